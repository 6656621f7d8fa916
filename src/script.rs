use std::io::Read;
use serde::Deserialize;
use thiserror::Error;
use crate::action::{MoveArgs, Trigger};
use crate::Character;

/// Failure to read a move script. Distinct from `CoupError`, which is about the game.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct ScriptRow {
    trigger: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    blocker: Option<String>,
    #[serde(default)]
    challenger: Option<String>,
    #[serde(default)]
    claim: Option<String>,
    #[serde(default)]
    reveal: Option<String>,
    // semicolon separated
    #[serde(default)]
    cards: Option<String>,
}

/// Reads a CSV move script with a `trigger,target,blocker,challenger,claim,reveal,cards` header.
pub fn read_script<R: Read>(reader: R) -> Result<Vec<(Trigger, MoveArgs)>, ScriptError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut moves = Vec::new();
    for (idx, row) in reader.deserialize::<ScriptRow>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let row = row?;
        let parse = |message: String| ScriptError::Parse { line, message };

        let trigger = row.trigger.parse::<Trigger>().map_err(parse)?;
        let claim = row.claim.as_deref().map(str::parse::<Character>).transpose().map_err(parse)?;
        let reveal = row.reveal.as_deref().map(str::parse::<Character>).transpose().map_err(parse)?;
        let cards = row.cards
            .as_deref()
            .map(|cards| cards.split(';').map(str::parse::<Character>).collect::<Result<Vec<_>, _>>())
            .transpose()
            .map_err(parse)?
            .unwrap_or_default();

        moves.push((trigger, MoveArgs {
            target: row.target,
            blocker: row.blocker,
            challenger: row.challenger,
            claim,
            reveal,
            cards,
        }));
    }

    Ok(moves)
}

#[cfg(test)]
mod tests {
    use crate::action::{MoveArgs, Trigger};
    use crate::script::{read_script, ScriptError};
    use crate::Character::{Ambassador, Captain, Duke};

    #[test]
    fn reads_moves() {
        let script = "\
trigger,target,blocker,challenger,claim,reveal,cards
income,,,,,,
steal,bob,,,,,
block_steal,,bob,,Ambassador,,
challenge_block_steal,,,ann,,captain,
return_cards,,,,,,duke;captain
";
        let moves = read_script(script.as_bytes()).unwrap();
        assert_eq!(moves.len(), 5);
        assert_eq!(moves[0], (Trigger::Income, MoveArgs::none()));
        assert_eq!(moves[1], (Trigger::Steal, MoveArgs::target("bob")));
        assert_eq!(moves[2], (Trigger::BlockSteal, MoveArgs::blocker("bob").with_claim(Ambassador)));
        assert_eq!(moves[3], (Trigger::ChallengeBlockSteal, MoveArgs::challenger("ann").with_reveal(Captain)));
        assert_eq!(moves[4].1.cards, vec![Duke, Captain]);
    }

    #[test]
    fn reports_bad_lines() {
        let script = "trigger,target\nincome,\nbribe,bob\n";
        match read_script(script.as_bytes()) {
            Err(ScriptError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a parse error, got {other:?}"),
        }

        let script = "trigger,claim\nblock_steal,jester\n";
        assert!(matches!(read_script(script.as_bytes()), Err(ScriptError::Parse { line: 2, .. })));
    }
}
