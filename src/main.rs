use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};

use chordfold::harmony::{root_label, Rationalizer};
use chordfold::tree::{
    generate_tree, infold_canonical, invert, outfold_down, outfold_up, position_to_path,
    within_limits, TreePosition, Trichord, MAX_TREE_DEPTH,
};
use chordfold::Config;

/// Explore just-intonation chord roots and fold-generated chord trees
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with ratios, limits and tree settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ratio for an interval in semitones
    Ratio {
        /// Interval in semitones, may be negative
        #[arg(allow_negative_numbers = true)]
        offset: i64,
    },
    /// Find the harmonic root of a chord
    Root {
        /// Ascending pitches in semitones relative to middle C
        #[arg(required = true, allow_negative_numbers = true)]
        pitches: Vec<i64>,
    },
    /// Apply a folding operation to a trichord
    Fold {
        /// Operation to apply
        #[arg(value_enum)]
        op: FoldCommand,
        /// Lowest note
        #[arg(allow_negative_numbers = true)]
        low: i64,
        /// Middle note
        #[arg(allow_negative_numbers = true)]
        mid: i64,
        /// Highest note
        #[arg(allow_negative_numbers = true)]
        high: i64,
    },
    /// Print the branches from the tree root to a position
    Path {
        /// Tree row, 0 is the root
        row: u32,
        /// Column within the row
        #[arg(allow_negative_numbers = true)]
        col: i64,
    },
    /// Print the chord at a tree position
    Chord {
        /// Tree row, 0 is the root
        row: u32,
        /// Column within the row
        #[arg(allow_negative_numbers = true)]
        col: i64,
    },
    /// Print the visible chords of the tree, row by row
    Tree {
        /// Rows below the root, overrides the configured depth
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_TREE_DEPTH))
        )]
        depth: Option<u32>,
    },
    /// Print the default configuration
    Defaults,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FoldCommand {
    /// Reflect the middle note above the highest
    Up,
    /// Reflect the middle note below the lowest
    Down,
    /// Undo the outfold that produced the chord
    In,
    /// Swap the two interval sizes
    Invert,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;

    match args.command {
        Commands::Ratio { offset } => {
            let ratio = config.rationalizer()?.eval(offset)?;
            println!("{} ({:.6})", ratio, ratio.to_f64());
        }
        Commands::Root { pitches } => {
            let rationalizer = config.rationalizer()?;
            println!("{}", root_label(&rationalizer, &pitches)?);
        }
        Commands::Fold { op, low, mid, high } => {
            let chord = [low, mid, high];
            let folded = match op {
                FoldCommand::Up => outfold_up(chord),
                FoldCommand::Down => outfold_down(chord),
                FoldCommand::In => infold_canonical(chord),
                FoldCommand::Invert => invert(chord),
            }
            .ok_or_else(|| anyhow!("folding {} leaves the pitch range", format_chord(&chord)))?;
            println!("{}", format_chord(&folded));
        }
        Commands::Path { row, col } => match position_to_path(row, col, 'L', 'R') {
            Some(path) => println!("{}", path.into_iter().collect::<String>()),
            None => println!("out of range"),
        },
        Commands::Chord { row, col } => {
            let tree = &config.tree;
            let position = TreePosition::new(row, col)
                .ok_or_else(|| anyhow!("column {} is out of range for row {}", col, row))?;
            let chord = position
                .chord(tree.root_degree, tree.bass_pitch)
                .ok_or_else(|| anyhow!("chord at {:?} leaves the pitch range", position))?;
            let rationalizer = config.rationalizer()?;
            let visible = within_limits(&chord, config.limits.as_ref());
            println!(
                "{}  root {}{}",
                format_chord(&chord),
                root_label(&rationalizer, &chord)?,
                if visible { "" } else { "  (hidden by limits)" }
            );
        }
        Commands::Tree { depth } => {
            let rationalizer = config.rationalizer()?;
            print_tree(&config, &rationalizer, depth.unwrap_or(config.tree.depth))?;
        }
        Commands::Defaults => {
            print!("{}", Config::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn print_tree(config: &Config, rationalizer: &Rationalizer, depth: u32) -> Result<()> {
    let rows = generate_tree(
        config.tree.root_degree,
        config.tree.bass_pitch,
        depth,
        config.limits.as_ref(),
    );

    for (row, nodes) in rows.iter().enumerate() {
        println!("row {}:", row);
        for node in nodes.iter().filter(|node| node.visible) {
            println!(
                "  {:>4}  {}  root {}",
                node.position.col,
                format_chord(&node.chord),
                root_label(rationalizer, &node.chord)?
            );
        }
    }

    Ok(())
}

fn format_chord(chord: &Trichord) -> String {
    let notes: Vec<String> = chord.iter().map(|p| p.to_string()).collect();
    format!("[{}]", notes.join(", "))
}
