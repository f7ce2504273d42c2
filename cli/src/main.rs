use anyhow::{Result, bail};
use clap::Parser;
use kmr::{SuffixArray, Symbol};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kmr")]
#[command(about = "Print the suffix array and rank array of a text")]
struct Cli {
    /// Text to index
    text: String,

    /// End-of-text symbol, appended unless already present
    #[arg(short, long, default_value_t = '$')]
    sentinel: char,

    /// Treat the text as bytes instead of characters
    #[arg(short, long)]
    bytes: bool,

    /// Reject texts where the sentinel is misplaced or not the smallest symbol
    #[arg(short, long)]
    check: bool,

    /// Print every suffix in sorted order
    #[arg(long)]
    suffixes: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.bytes {
        let Ok(sentinel) = u8::try_from(cli.sentinel) else {
            bail!("sentinel {:?} does not fit in a byte", cli.sentinel);
        };
        let sa = construct(cli.text.bytes(), sentinel, cli.check)?;
        report(&sa, cli.suffixes, |s| String::from_utf8_lossy(s).into_owned());
    } else {
        let sa = construct(cli.text.chars(), cli.sentinel, cli.check)?;
        report(&sa, cli.suffixes, |s| s.iter().collect());
    }

    Ok(())
}

fn construct<S, I>(text: I, sentinel: S, check: bool) -> Result<SuffixArray<S>>
where
    S: Symbol + Send + Sync + 'static,
    I: IntoIterator<Item = S>,
{
    let sa = if check {
        SuffixArray::checked(text, sentinel)?
    } else {
        SuffixArray::build(text, sentinel)
    };
    info!("normalized text is {} symbols", sa.len());
    Ok(sa)
}

fn report<S, F>(sa: &SuffixArray<S>, suffixes: bool, render: F)
where
    S: Symbol,
    F: Fn(&[S]) -> String,
{
    println!("suffix array: {:?}", sa.suffix_array());
    println!("rank array:   {:?}", sa.rank_array());

    if suffixes {
        let width = sa.len().to_string().len();
        for (k, &i) in sa.suffix_array().iter().enumerate() {
            println!("{:>width$} {:>width$}  {}", k, i, render(sa.suffix(k)));
        }
    }
}
