//! Derivation benchmarks
//!
//! - phrase -> 64-byte seed (PBKDF2, 2048 rounds)
//! - seed -> Ethereum keypair
//! - seed -> Solana keypair
//! - phrase -> full wallet record

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hd_vault::core::derivation::{derive_wallet, ethereum, solana};
use hd_vault::core::seed;

const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn bench_seed_expansion(c: &mut Criterion) {
    c.bench_function("validate_and_expand_seed", |b| {
        b.iter(|| seed::validate(black_box(MNEMONIC)).expect("valid phrase"));
    });
}

fn bench_chain_keypairs(c: &mut Criterion) {
    let phrase = seed::validate(MNEMONIC).expect("valid phrase");
    let binary_seed = phrase.to_seed();

    c.bench_function("ethereum_bip32_keypair", |b| {
        b.iter(|| ethereum::derive_keypair(black_box(binary_seed), black_box(3)).expect("derive failed"));
    });

    c.bench_function("solana_slip10_keypair", |b| {
        b.iter(|| solana::derive_keypair(black_box(binary_seed), black_box(3)).expect("derive failed"));
    });
}

fn bench_wallet_record(c: &mut Criterion) {
    let phrase = seed::validate(MNEMONIC).expect("valid phrase");

    c.bench_function("derive_wallet_record", |b| {
        b.iter(|| derive_wallet(black_box(&phrase), black_box(0)).expect("derive failed"));
    });
}

criterion_group!(benches, bench_seed_expansion, bench_chain_keypairs, bench_wallet_record);
criterion_main!(benches);
