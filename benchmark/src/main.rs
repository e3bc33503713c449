mod timer;

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use hanseg::{Dictionary, Segmenter, StrReader};

use timer::Timer;

use clap::Parser;

const RUNS: usize = 10;
const TRIALS: usize = 10;

#[derive(Parser, Debug)]
#[clap(name = "benchmark", about = "Measures the time to segment lines read from stdin.")]
struct Args {
    /// Binary dictionary built by the compile program.
    #[clap(short = 'i', long)]
    dict_in: PathBuf,

    /// Uses the smart mode.
    #[clap(long)]
    smart: bool,

    /// Number of characters held by the segmenter buffer.
    #[clap(short = 'b', long, default_value = "4096")]
    buffer_capacity: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let reader = BufReader::new(File::open(args.dict_in)?);
    let dict = Dictionary::read(reader)?;

    let lines = std::io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()?;

    let mut segmenter = Segmenter::new(&dict, StrReader::new(""), args.smart)
        .buffer_capacity(args.buffer_capacity)?;

    let mut measure = |t: &mut Timer| -> Result<usize, Box<dyn Error>> {
        let mut n_lexemes = 0;
        for _ in 0..RUNS {
            t.start();
            for line in &lines {
                segmenter.reset(StrReader::new(line));
                while segmenter.next_lexeme()?.is_some() {
                    n_lexemes += 1;
                }
            }
            t.stop();
        }
        Ok(n_lexemes)
    };

    let mut t = Timer::new();

    // Warmup
    t.reset();
    let n_lexemes = measure(&mut t)?;
    println!("Warmup: {}", t.average());
    eprintln!("Number_of_lexemes_per_run: {}", n_lexemes / RUNS);

    let (mut min, mut max, mut avg) = (0.0, 0.0, 0.0);

    for _ in 0..TRIALS {
        t.reset();
        measure(&mut t)?;
        t.trim_extremes();
        min += t.min();
        avg += t.average();
        max += t.max();
    }

    min /= TRIALS as f64;
    avg /= TRIALS as f64;
    max /= TRIALS as f64;

    println!("Number_of_lines: {}", lines.len());
    println!(
        "Elapsed_seconds_to_segment_all_lines: [{},{},{}]",
        min, avg, max
    );

    Ok(())
}
