use std::process::exit;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info};

use taskpool::{Result, ResultHandle, SharedQueueThreadPool, ThreadPool};

#[derive(Parser)]
#[command(name = "taskpool-demo", version, about = "Runs a batch of tasks on a worker pool")]
struct Cli {
    /// Number of worker threads
    #[arg(long, default_value_t = 4, value_name = "N")]
    threads: u32,

    /// Number of tasks to submit
    #[arg(long, default_value_t = 4, value_name = "K")]
    tasks: u32,

    /// Delay applied to tasks 1 and 2, in milliseconds
    #[arg(long, default_value_t = 100, value_name = "MS")]
    delay_ms: u64,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("taskpool-demo {}", env!("CARGO_PKG_VERSION"));
    info!("Workers: {}, tasks: {}", cli.threads, cli.tasks);

    let start = Instant::now();
    let pool = SharedQueueThreadPool::new(cli.threads)?;
    let delay = Duration::from_millis(cli.delay_ms);

    let handles = (1..=cli.tasks)
        .map(|n| pool.submit(move || work(n, delay)))
        .collect::<Result<Vec<ResultHandle<u32>>>>()?;

    for mut handle in handles {
        println!("result: {}", handle.read()?);
    }

    drop(pool);
    info!("Finished in {:?}", start.elapsed());
    Ok(())
}

/// Sleeps if `n` is one of the first two tasks, then echoes `n`.
fn work(n: u32, delay: Duration) -> u32 {
    if n <= 2 {
        thread::sleep(delay);
    }
    println!("{}", n);
    n
}
