//! Shared input generators for the dartmap benchmarks.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// Hiragana mixed with a few ASCII letters, close to dictionary keys of Japanese text.
const ALPHABET: &[char] = &[
    'あ', 'い', 'う', 'え', 'お', 'か', 'き', 'く', 'け', 'こ', 'さ', 'し', 'す', 'せ', 'そ',
    'た', 'ち', 'つ', 'て', 'と', 'な', 'に', 'ぬ', 'ね', 'の', 'a', 'b', 'c', 'd', 'e',
];

pub fn load_file<P>(path: P) -> Vec<String>
where
    P: AsRef<Path>,
{
    let file = File::open(path).unwrap();
    let buf = BufReader::new(file);
    buf.lines().map(|line| line.unwrap()).collect()
}

/// Generates `num_keys` distinct non-empty keys.
pub fn random_keys(num_keys: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys = Vec::with_capacity(num_keys);
    let mut seen = std::collections::HashSet::new();
    while keys.len() < num_keys {
        let key = random_string(&mut rng, 1, 8);
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// Generates `num_texts` texts of up to 64 characters.
pub fn random_texts(num_texts: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_texts)
        .map(|_| random_string(&mut rng, 16, 64))
        .collect()
}

pub fn random_sample(keys: &[String], num_queries: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_queries)
        .map(|_| keys.choose(&mut rng).unwrap().clone())
        .collect()
}

fn random_string(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let len = rng.gen_range(min_len..=max_len);
    (0..len)
        .map(|_| *ALPHABET.choose(rng).unwrap())
        .collect()
}
