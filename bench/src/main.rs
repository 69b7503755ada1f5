use std::time::Instant;

use dartmap::{Builder, Statistics, SymbolMode};
use dartmap_bench::{load_file, random_keys, random_sample, random_texts};

use clap::Parser;

const TRIALS: usize = 10;
const QUERIES: usize = 1000;
const SEED: u64 = 42;

#[derive(Parser, Debug)]
#[clap(name = "measure", about = "A program to measure the performance.")]
struct Args {
    #[clap(short = 'k', long)]
    keys_filename: Option<String>,

    #[clap(short = 't', long)]
    texts_filename: Option<String>,

    /// Number of synthetic keys used when no key file is given.
    #[clap(short = 'n', long, default_value = "100000")]
    num_keys: usize,
}

fn main() {
    let args = Args::parse();

    let keys = if let Some(keys_filename) = args.keys_filename {
        println!("keys_filename: {}", &keys_filename);
        load_file(&keys_filename)
    } else {
        random_keys(args.num_keys, SEED)
    };
    let queries = random_sample(&keys, QUERIES, SEED);
    let texts = if let Some(texts_filename) = args.texts_filename {
        println!("texts_filename: {}", &texts_filename);
        load_file(&texts_filename)
    } else {
        random_texts(QUERIES, SEED)
    };

    println!("#keys: {}", keys.len());

    for (name, mode) in [
        ("dartmap/code_point", SymbolMode::CodePoint),
        ("dartmap/dense", SymbolMode::Dense),
    ] {
        println!("[{}]", name);
        let start = Instant::now();
        let map = Builder::new()
            .symbol_mode(mode)
            .build_from_records(keys.iter().enumerate().map(|(i, k)| (k, i)))
            .unwrap();
        let duration = start.elapsed();
        print_heap_bytes(map.heap_bytes());
        println!("num_elems: {}", map.num_elems());
        println!("num_vacants: {}", map.num_vacants());
        println!("vacant_ratio: {:.3}", map.vacant_ratio());
        println!("construction: {:.3} [sec]", duration.as_secs_f64());

        {
            let mut dummy = 0;
            let elapsed_sec = measure(TRIALS, || {
                for query in &queries {
                    dummy += map.get(query).unwrap();
                }
            });
            println!(
                "get: {:.3} [ns/query]",
                to_ns(elapsed_sec) / queries.len() as f64
            );
            println!("dummy: {}", dummy);
        }

        {
            let mut dummy = 0;
            let elapsed_sec = measure(TRIALS, || {
                for text in &texts {
                    for m in map.common_prefix_search(text) {
                        dummy += m.end_chars() + m.value();
                    }
                }
            });
            println!(
                "enumeration: {:.3} [us/text]",
                to_us(elapsed_sec) / texts.len() as f64
            );
            println!("dummy: {}", dummy);
        }
    }
}

fn print_heap_bytes(bytes: usize) {
    println!(
        "heap_bytes: {} bytes, {:.3} MiB",
        bytes,
        bytes as f64 / (1024.0 * 1024.0)
    );
}

fn measure<F>(num_trials: usize, mut func: F) -> f64
where
    F: FnMut(),
{
    // Warmup
    func();
    // Measure
    let start = Instant::now();
    for _ in 0..num_trials {
        func();
    }
    let duration = start.elapsed();
    duration.as_secs_f64() / num_trials as f64
}

fn to_us(sec: f64) -> f64 {
    sec * 1_000_000.
}

fn to_ns(sec: f64) -> f64 {
    sec * 1_000_000_000.
}
