use decbin::{
    bin_to_dec_with_spec, dec_to_bin, parse_decimal, positive_pow,
    BigBinFloat, BigDecFloat, FloatSpec,
};

fn test_parse_long_literal() {
    black_box(
        parse_decimal(b"22223.511111111111111111111111111111").unwrap(),
    );
}

fn test_dec_to_bin_single() {
    let (dec, trailing) = parse_decimal(b"0.7").unwrap();
    black_box(dec_to_bin(dec, &FloatSpec::SINGLE, trailing).unwrap());
}

fn test_dec_to_bin_double() {
    let (dec, trailing) =
        parse_decimal(b"123456789.123456789123456789").unwrap();
    black_box(dec_to_bin(dec, &FloatSpec::DOUBLE, trailing).unwrap());
}

fn test_shortest_decimal_double() {
    let (dec, trailing) = parse_decimal(b"0.1").unwrap();
    let bin = dec_to_bin(dec, &FloatSpec::DOUBLE, trailing).unwrap();
    black_box(bin_to_dec_with_spec(bin, &FloatSpec::DOUBLE).unwrap());
}

fn test_positive_pow() {
    let five = BigDecFloat::from_fragment(5).unwrap();
    black_box(positive_pow(&five, 1074).unwrap());
}

fn test_denormal_round_trip() {
    let mut smallest = BigBinFloat::from_fragment(1).unwrap();
    smallest.inplace_shift(-1074).unwrap();
    let dec = bin_to_dec_with_spec(smallest, &FloatSpec::DOUBLE).unwrap();
    black_box(dec_to_bin(dec, &FloatSpec::DOUBLE, 0).unwrap());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_parse_long_literal", |b| {
        b.iter(test_parse_long_literal)
    });
    c.bench_function("test_dec_to_bin_single", |b| {
        b.iter(test_dec_to_bin_single)
    });
    c.bench_function("test_dec_to_bin_double", |b| {
        b.iter(test_dec_to_bin_double)
    });
    c.bench_function("test_shortest_decimal_double", |b| {
        b.iter(test_shortest_decimal_double)
    });
    c.bench_function("test_positive_pow", |b| b.iter(test_positive_pow));
    c.bench_function("test_denormal_round_trip", |b| {
        b.iter(test_denormal_round_trip)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
