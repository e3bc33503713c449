use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::PathBuf;

use hanseg::{Dictionary, Segmenter, Utf8Reader};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Segments lines read from stdin.")]
struct Args {
    /// Binary dictionary built by the compile program.
    #[clap(short = 'i', long)]
    dict_in: PathBuf,

    /// Outputs one coarse path with numerals and quantifiers fused.
    #[clap(long)]
    smart: bool,

    /// Drops stop words.
    #[clap(short = 'S', long)]
    skip_stop_words: bool,

    /// Outputs only surfaces separated by spaces.
    #[clap(short = 'w', long)]
    wakachi: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let reader = BufReader::new(File::open(args.dict_in)?);
    let dict = Dictionary::read(reader)?;

    let mut segmenter = Segmenter::new(&dict, Utf8Reader::new(Cursor::new(vec![])), args.smart)
        .skip_stop_words(args.skip_stop_words);
    eprintln!("Ready to tokenize");

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());

    #[allow(clippy::significant_drop_in_scrutinee)]
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        segmenter.reset(Utf8Reader::new(Cursor::new(line.into_bytes())));
        if args.wakachi {
            let mut first = true;
            while let Some(lexeme) = segmenter.next_lexeme()? {
                if lexeme.is_alternative() {
                    continue;
                }
                if !first {
                    out.write_all(b" ")?;
                }
                out.write_all(lexeme.text().as_bytes())?;
                first = false;
            }
            out.write_all(b"\n")?;
        } else {
            while let Some(lexeme) = segmenter.next_lexeme()? {
                writeln!(
                    &mut out,
                    "{}\t{}\t{}\t{}",
                    lexeme.text(),
                    lexeme.begin_offset(),
                    lexeme.end_offset(),
                    lexeme.lex_type()
                )?;
            }
            out.write_all(b"EOS\n")?;
        }
    }

    Ok(())
}
