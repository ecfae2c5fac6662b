use solfege::drill::DrillSession;
use solfege::{
    render_staff, Clef, Difficulty, DirectoryLibrary, DocumentStore, DrillConfig, NoteName,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;

const DEFAULT_LIBRARY_DIR: &str = "library";

fn usage() -> ! {
    eprintln!("Usage: solfege drill [--clef treble|bass] [--difficulty easy|medium|hard] [--config FILE] [--seed N]");
    eprintln!("       solfege library [--dir DIR] [--config FILE] list");
    eprintln!("       solfege library [--dir DIR] [--config FILE] add <file.pdf>...");
    eprintln!("       solfege library [--dir DIR] [--config FILE] remove <name>");
    process::exit(1);
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Turn typed input into an answer label: case and surrounding space are
/// ignored and `RE` stands for `RÉ`, which most keyboards cannot type directly.
fn normalize_answer(line: &str) -> String {
    match line.trim().to_uppercase().as_str() {
        "RE" => NoteName::Re.label().to_string(),
        other => other.to_string(),
    }
}

/// Flags shared by both commands, plus whatever positional arguments remain
struct Options {
    config: DrillConfig,
    library_dir: Option<PathBuf>,
    positional: Vec<String>,
}

fn parse_options(args: &[String]) -> Options {
    let mut config_path: Option<&String> = None;
    let mut clef: Option<&String> = None;
    let mut difficulty: Option<&String> = None;
    let mut seed: Option<&String> = None;
    let mut library_dir: Option<PathBuf> = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--config" => &mut config_path,
            "--clef" => &mut clef,
            "--difficulty" => &mut difficulty,
            "--seed" => &mut seed,
            "--dir" => {
                library_dir = Some(PathBuf::from(iter.next().unwrap_or_else(|| usage())));
                continue;
            }
            flag if flag.starts_with("--") => usage(),
            _ => {
                positional.push(arg.clone());
                continue;
            }
        };
        *slot = Some(iter.next().unwrap_or_else(|| usage()));
    }

    let mut config = match config_path {
        Some(path) => DrillConfig::load(Path::new(path)).unwrap_or_else(|e| fail(e)),
        None => DrillConfig::default(),
    };

    // Command-line flags override the file
    if let Some(s) = clef {
        config.clef = Clef::from_str(s).unwrap_or_else(|| fail(format!("unknown clef '{}'", s)));
    }
    if let Some(s) = difficulty {
        config.difficulty = Difficulty::from_str(s)
            .unwrap_or_else(|| fail(format!("unknown difficulty '{}'", s)));
    }
    if let Some(s) = seed {
        config.seed = Some(s.parse().unwrap_or_else(|_| fail(format!("invalid seed '{}'", s))));
    }

    Options {
        config,
        library_dir,
        positional,
    }
}

fn run_drill(options: Options) {
    let mut session = DrillSession::from_config(&options.config);
    session.start_configured();

    let labels: Vec<&str> = NoteName::ALL.iter().map(|n| n.label()).collect();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!(
            "Score : {}   {}   ({} clef, {})",
            session.score(),
            session.feedback().symbol(),
            session.current_clef(),
            session.difficulty()
        );
        print!("{}", render_staff(session.current_clef(), session.current_note_offset()));
        print!("{} (q to quit) > ", labels.join(" "));
        if let Err(e) = io::stdout().flush() {
            fail(e);
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => fail(e),
            None => break,
        };
        let candidate = normalize_answer(&line);
        if candidate == "Q" {
            break;
        }

        let answer = session.check_answer(&candidate);
        println!("{}", session.feedback().symbol());
        if let Some(deferred) = answer.deferred {
            thread::sleep(deferred.delay);
            session.fire(deferred);
        }
    }

    println!("Final score: {}", session.score());
}

fn run_library(options: Options) {
    let dir = options
        .library_dir
        .or_else(|| options.config.library_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_DIR));
    let mut library = DirectoryLibrary::open(&dir).unwrap_or_else(|e| fail(e));

    let (command, rest) = match options.positional.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => usage(),
    };

    match command {
        "list" => {
            let documents = library.list();
            if documents.is_empty() {
                println!("Your library is empty.");
            }
            for handle in documents {
                println!("{}", handle.name());
            }
        }
        "add" if !rest.is_empty() => {
            for source in rest {
                match library.add(Path::new(source)) {
                    Ok(handle) => eprintln!("Added {}", handle.name()),
                    Err(e) => fail(e),
                }
            }
        }
        "remove" if rest.len() == 1 => match library.find(&rest[0]) {
            Some(handle) => library.remove(&handle),
            None => fail(format!("no document named '{}'", rest[0])),
        },
        _ => usage(),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let options = parse_options(&args[2..]);
    match args[1].as_str() {
        "drill" => run_drill(options),
        "library" => run_library(options),
        _ => usage(),
    }
}
