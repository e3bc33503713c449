use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use hanseg::DictionaryBuilder;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "compile",
    about = "A program to compile word lists into a binary dictionary."
)]
struct Args {
    /// Main word list (main.dic), one word per line.
    #[clap(short = 'm', long)]
    main_in: PathBuf,

    /// Quantifier word list (quantifier.dic).
    #[clap(short = 'q', long)]
    quantifier_in: Option<PathBuf>,

    /// Stop word list (stopword.dic).
    #[clap(short = 's', long)]
    stopword_in: Option<PathBuf>,

    /// Extension word lists layered on top of the main word list.
    #[clap(short = 'e', long)]
    ext_in: Vec<PathBuf>,

    /// Word list whose entries are removed from the main dictionary.
    #[clap(short = 'd', long)]
    disabled_in: Option<PathBuf>,

    /// File to which the binary dictionary is output.
    #[clap(short = 'o', long)]
    dict_out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Compiling the dictionary...");
    let start = Instant::now();
    let mut builder = DictionaryBuilder::new();
    builder.add_main_words(File::open(&args.main_in)?)?;
    for ext_in in &args.ext_in {
        builder.add_main_words(File::open(ext_in)?)?;
    }
    if let Some(quantifier_in) = &args.quantifier_in {
        builder.add_quantifier_words(File::open(quantifier_in)?)?;
    }
    if let Some(stopword_in) = &args.stopword_in {
        builder.add_stop_words(File::open(stopword_in)?)?;
    }
    if let Some(disabled_in) = &args.disabled_in {
        builder.disable_words(File::open(disabled_in)?)?;
    }
    let dict = builder.build();
    eprintln!("{} seconds", start.elapsed().as_secs_f64());
    eprintln!(
        "main: {}, quantifier: {}, stop words: {}",
        dict.main_trie().num_words(),
        dict.quantifier_trie().num_words(),
        dict.stop_word_trie().num_words(),
    );

    eprintln!("Writing the dictionary...: {:?}", &args.dict_out);
    let mut wtr = BufWriter::new(File::create(&args.dict_out)?);
    let num_bytes = dict.write(&mut wtr)?;
    eprintln!("{} MiB", num_bytes as f64 / (1024. * 1024.));

    Ok(())
}
