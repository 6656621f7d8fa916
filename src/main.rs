use std::error::Error;
use std::fs::File;
use coup_engine::{read_script, transitions, Coup, Setup};

const USAGE: &str = "usage: coup-engine <setup.json> <moves.csv>\n       coup-engine --graph";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag] if flag == "--graph" => {
            println!("{}", transitions().dot());
            Ok(())
        }
        [setup, script] => run(setup, script),
        _ => Err(USAGE.into()),
    }
}

fn run(setup_path: &str, script_path: &str) -> Result<(), Box<dyn Error>> {
    let setup: Setup = serde_json::from_reader(File::open(setup_path)?)?;
    let moves = read_script(File::open(script_path)?)?;
    let mut coup = Coup::from_setup(setup)?;

    println!("{}", serde_json::to_string(&coup.snapshot())?);

    for (trigger, args) in moves {
        match coup.apply_move(trigger, args) {
            Ok(_) => println!("{}", serde_json::to_string(&coup.snapshot())?),
            Err(err) if err.is_fatal() => return Err(err.into()),
            // rejected moves are reported and the script carries on
            Err(err) => eprintln!("{trigger}: {err}"),
        }

        if let Some(winner) = coup.winner() {
            println!("game over, winner is {winner}");
            break;
        }
    }

    Ok(())
}
