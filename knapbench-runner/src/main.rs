use anyhow::{anyhow, Result};
use clap::{arg, Command};
use knapbench_instance::{generate_items, make_seed, Instance, Item};
use knapbench_solvers::Algorithm;
use serde::Serialize;
use std::{fmt::Write as FmtWrite, fs, path::PathBuf, time::Instant};

fn cli() -> Command {
    Command::new("knapbench-runner")
        .about("Benchmarks four 0-1 knapsack strategies over synthetic instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Sweeps the experiment grid and writes a results csv")
                .arg(
                    arg!(--seed [SEED] "Experiment seed")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--sizes [SIZES] "Comma-separated problem sizes (default: built-in grid)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--capacities [CAPACITIES] "Comma-separated capacities (default: 100,10000,100000,1000000)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "Results csv path")
                        .default_value("results.csv")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"dump-items" [SIZE] "Also write the item set for this size as <SIZE>_items.csv")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solves a single generated instance")
                .arg(
                    arg!(<NUM_ITEMS> "Number of items to generate")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(<CAPACITY> "Knapsack capacity")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "exhaustive|dynamic|greedy|branch_and_bound (all four when omitted)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "Experiment seed")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, a json report will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("run", sub_m)) => run(
            *sub_m.get_one::<u64>("seed").unwrap(),
            sub_m.get_one::<String>("sizes").cloned(),
            sub_m.get_one::<String>("capacities").cloned(),
            sub_m.get_one::<PathBuf>("output").unwrap().clone(),
            sub_m.get_one::<usize>("dump-items").copied(),
        ),
        Some(("solve", sub_m)) => solve(
            *sub_m.get_one::<usize>("NUM_ITEMS").unwrap(),
            *sub_m.get_one::<u32>("CAPACITY").unwrap(),
            sub_m.get_one::<String>("algorithm").cloned(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// One successful (size, capacity, algorithm) cell of the sweep. Skipped
/// cells produce no record.
#[derive(Serialize, Debug, Clone)]
struct RunRecord {
    num_items: usize,
    capacity: u32,
    algorithm: String,
    value: f64,
    elapsed_ms: f64,
}

#[derive(Serialize, Debug)]
struct SolveReport {
    num_items: usize,
    capacity: u32,
    seed: u64,
    runs: Vec<AlgorithmRun>,
}

#[derive(Serialize, Debug)]
struct AlgorithmRun {
    algorithm: String,
    value: f64,
    selected: usize,
    elapsed_ms: f64,
}

fn run(
    seed: u64,
    sizes: Option<String>,
    capacities: Option<String>,
    output: PathBuf,
    dump_items: Option<usize>,
) -> Result<()> {
    let sizes = match sizes {
        Some(list) => parse_list(&list)?,
        None => default_sizes(),
    };
    let capacities = match capacities {
        Some(list) => parse_list(&list)?,
        None => default_capacities(),
    };

    let total_timer = Instant::now();
    let mut records: Vec<RunRecord> = Vec::new();
    for &num_items in &sizes {
        // One item set per size, shared across all capacities
        let items = generate_items(&make_seed(seed.wrapping_add(num_items as u64)), num_items);
        if dump_items == Some(num_items) {
            let path = format!("{}_items.csv", num_items);
            fs::write(&path, items_csv(&items))?;
            println!("Item set written to {}", path);
        }
        for &capacity in &capacities {
            if skip_cell(num_items, capacity) {
                continue;
            }
            let instance = Instance::new(items.clone(), capacity);
            for algorithm in Algorithm::ALL {
                println!(
                    "n={} capacity={} algorithm={} ...",
                    num_items, capacity, algorithm
                );
                let timer = Instant::now();
                let result = algorithm.solve(&instance);
                let elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;
                match result {
                    Ok(solution) => {
                        println!(
                            "  value={:.2} selected={} elapsed={:.2}ms",
                            solution.value,
                            solution.selected_count(),
                            elapsed_ms
                        );
                        if num_items <= 20 {
                            print!("{}", detail_table(&instance, &solution.selection));
                        }
                        records.push(RunRecord {
                            num_items,
                            capacity,
                            algorithm: algorithm.name().to_string(),
                            value: solution.value,
                            elapsed_ms,
                        });
                    }
                    Err(skip) => println!("  skipped: {}", skip),
                }
            }
        }
    }

    fs::write(&output, results_csv(&records))?;
    println!();
    println!(
        "Total elapsed: {:.2}s over {} runs",
        total_timer.elapsed().as_secs_f64(),
        records.len()
    );
    println!("Results written to {}", output.display());
    Ok(())
}

fn solve(
    num_items: usize,
    capacity: u32,
    algorithm: Option<String>,
    seed: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    let algorithms: Vec<Algorithm> = match algorithm {
        Some(name) => vec![name.parse()?],
        None => Algorithm::ALL.to_vec(),
    };
    let instance = Instance::generate(
        &make_seed(seed.wrapping_add(num_items as u64)),
        num_items,
        capacity,
    );

    let mut runs = Vec::new();
    for algorithm in algorithms {
        let timer = Instant::now();
        let result = algorithm.solve(&instance);
        let elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;
        // Skips surface as the -1 sentinel in the report
        let (value, selected) = match result {
            Ok(solution) => {
                println!(
                    "{}: value={:.2} selected={} elapsed={:.2}ms",
                    algorithm,
                    solution.value,
                    solution.selected_count(),
                    elapsed_ms
                );
                if num_items <= 20 {
                    print!("{}", detail_table(&instance, &solution.selection));
                }
                (solution.value, solution.selected_count())
            }
            Err(skip) => {
                println!("{}: skipped: {}", algorithm, skip);
                (-1.0, 0)
            }
        };
        runs.push(AlgorithmRun {
            algorithm: algorithm.name().to_string(),
            value,
            selected,
            elapsed_ms,
        });
    }

    if let Some(path) = output {
        let report = SolveReport {
            num_items,
            capacity,
            seed,
            runs,
        };
        fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

/// Default experiment grid: fine-grained small sizes, then coarse large
/// ones.
fn default_sizes() -> Vec<usize> {
    let mut sizes: Vec<usize> = (10..=100).step_by(5).collect();
    sizes.extend((1000..=10000).step_by(1000));
    sizes.extend([20000, 40000, 80000, 160000, 320000]);
    sizes
}

fn default_capacities() -> Vec<u32> {
    vec![100, 10_000, 100_000, 1_000_000]
}

/// Small sizes run only at small capacity, large sizes only at large
/// capacity; everything else is skipped.
fn skip_cell(num_items: usize, capacity: u32) -> bool {
    (num_items <= 100 && capacity > 1000) || (num_items > 100 && capacity < 1000)
}

fn parse_list<T: std::str::FromStr>(list: &str) -> Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    list.split(',')
        .map(|entry| {
            entry
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow!("Invalid list entry '{}': {}", entry, e))
        })
        .collect()
}

fn results_csv(records: &[RunRecord]) -> String {
    let mut csv = String::new();
    writeln!(csv, "n,capacity,algorithm,value,elapsed_ms").unwrap();
    for r in records {
        writeln!(
            csv,
            "{},{},{},{:.2},{:.2}",
            r.num_items, r.capacity, r.algorithm, r.value, r.elapsed_ms
        )
        .unwrap();
    }
    csv
}

fn items_csv(items: &[Item]) -> String {
    let mut csv = String::new();
    writeln!(csv, "id,weight,value").unwrap();
    for item in items {
        writeln!(csv, "{},{},{:.2}", item.id, item.weight, item.value).unwrap();
    }
    csv
}

fn detail_table(instance: &Instance, selection: &[bool]) -> String {
    let mut out = String::new();
    writeln!(out, "  {:>5}  {:>6}  {:>8}", "id", "weight", "value").unwrap();
    let mut total_weight = 0u32;
    let mut total_value = 0.0;
    for (item, &selected) in instance.items.iter().zip(selection) {
        if selected {
            writeln!(
                out,
                "  {:>5}  {:>6}  {:>8.2}",
                item.id, item.weight, item.value
            )
            .unwrap();
            total_weight += item.weight;
            total_value += item.value;
        }
    }
    writeln!(
        out,
        "  {:>5}  {:>6}  {:>8.2}  (capacity {})",
        "total", total_weight, total_value, instance.capacity
    )
    .unwrap();
    out
}
