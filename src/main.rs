use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_of_life::Board;
use game_of_life::driver;
use game_of_life::driver::DEFAULT_FIRST_GENERATION;
use game_of_life::driver::DEFAULT_GENERATIONS;
use game_of_life::driver::RunConfig;
use game_of_life::parse_rle;
use game_of_life::patterns;
use game_of_life::plaintext;
use game_of_life::render;
use game_of_life::render::RenderStyle;

/// Print successive generations of Conway's Game of Life.
#[derive(Parser)]
#[command(name = "game-of-life", about = "Print successive generations of Conway's Game of Life")]
struct Args {
    /// Number of generations to print, the initial board included.
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    generations: u32,

    /// Index printed with the initial board.
    #[arg(long, default_value_t = DEFAULT_FIRST_GENERATION)]
    start: u64,

    /// Built-in pattern to start from.
    #[arg(short, long, default_value = "blinker", conflicts_with = "file")]
    pattern: String,

    /// Read the initial board from a file. `.rle` files are read as RLE, anything else as
    /// plaintext.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// How boards are drawn: list, cells or braille.
    #[arg(short, long, default_value = "list")]
    style: RenderStyle,

    /// Redraw in place, waiting this many milliseconds between generations.
    #[arg(long, value_name = "MS")]
    animate: Option<u64>,
}

fn load_board(args: &Args) -> Result<Board> {
    let Some(path) = &args.file else {
        return Ok(patterns::board(&args.pattern)?);
    };

    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if is_rle(path) {
        let file = parse_rle::read_rle(&bytes)
            .with_context(|| format!("Failed to parse RLE file {}", path.display()))?;

        if let Some(name) = file.name {
            info!(name = %String::from_utf8_lossy(name), "loaded pattern");
        }

        Ok(file.board)
    } else {
        plaintext::read_plaintext(&bytes)
            .with_context(|| format!("Failed to parse plaintext file {}", path.display()))
    }
}

fn is_rle(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("rle"))
}

fn print_generation<W: Write>(
    out: &mut W,
    board: &Board,
    generation: u64,
    style: RenderStyle,
    animate: Option<Duration>,
    first: bool,
) -> io::Result<()> {
    if let Some(delay) = animate {
        if !first {
            thread::sleep(delay);
        }

        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
    }

    queue!(
        out,
        style::Print(render::generation_header(generation)),
        style::Print('\n'),
        style::Print(render::render(board, style))
    )?;

    out.flush()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let board = load_board(&args)?;
    let config = RunConfig::default()
        .generations(args.generations)
        .first_generation(args.start);
    let animate = args.animate.map(Duration::from_millis);

    info!(
        width = board.width(),
        height = board.height(),
        generations = config.generations,
        "starting"
    );

    let mut stdout = io::stdout();
    driver::try_run(board, config, |board, generation| {
        let first = generation == config.first_generation;
        print_generation(&mut stdout, board, generation, args.style, animate, first)
    })
    .context("Failed to print generation")?;

    queue!(stdout, style::Print(render::END_OF_LIFE), style::Print('\n'))?;
    stdout.flush()?;

    Ok(())
}
