use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use crate::action::{MoveArgs, Trigger, EXCHANGE_DRAW, FORCED_COUP_COINS, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, STARTING_COINS, STEAL_AMOUNT};
use crate::deck::Deck;
use crate::graph::transitions;
use crate::player::Player;
use crate::rotation::Rotation;
use crate::state::{Effect, State, StateName};
use crate::view::{MoveOutcome, PlayerView, Snapshot};
use crate::{Character, CoupError, CHARACTER_VARIANTS};
use crate::Character::{Ambassador, Captain, Contessa, Duke};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    // pre-dealt cards, the rest of the hand is dealt from the deck
    #[serde(default)]
    pub cards: Vec<Character>,
    #[serde(default)]
    pub coins: Option<u32>,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), cards: vec![], coins: None }
    }

    pub fn with_cards(mut self, cards: &[Character]) -> Self {
        self.cards = cards.to_vec();
        self
    }

    pub fn with_coins(mut self, coins: u32) -> Self {
        self.coins = Some(coins);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: Vec<PlayerSetup>,
}

// who is being challenged over which character, and who pays if the claim holds
#[derive(Copy, Clone, Debug)]
struct Challenge {
    challenged: usize,
    challenger: usize,
    claim: Character,
    reveal: Option<Character>,
}

/// A game session. Owns the roster, the rotation, the deck and the state machine.
#[derive(Clone)]
pub struct Coup {
    turn: usize,
    state: State,
    players: Vec<Player>,
    rotation: Rotation,
    deck: Deck,
    faulted: bool,
}

impl Debug for Coup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("T {} | P {} | {}\n", self.turn, self.rotation.current(), self.state.name()).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            f.write_str(format!("\tP {player_idx} {}: ${} | {:?}\n", player.name, player.coins, player.cards).as_str())?;
        }
        Ok(())
    }
}

impl Coup {
    pub fn new(setups: Vec<PlayerSetup>, rng: Pcg64) -> Result<Self, CoupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&setups.len()) {
            return Err(CoupError::InvalidSetup(format!(
                "{} players given, between {MIN_PLAYERS} and {MAX_PLAYERS} are supported",
                setups.len()
            )));
        }

        for (idx, setup) in setups.iter().enumerate() {
            if setup.name.is_empty() {
                return Err(CoupError::InvalidSetup(format!("player {idx} has no name")));
            }
            if setups[..idx].iter().any(|other| other.name == setup.name) {
                return Err(CoupError::InvalidSetup(format!("duplicate player name {:?}", setup.name)));
            }
            if setup.cards.len() > HAND_SIZE {
                return Err(CoupError::InvalidSetup(format!(
                    "{} was dealt {} cards, a hand holds {HAND_SIZE}",
                    setup.name,
                    setup.cards.len()
                )));
            }
        }

        let excluded: Vec<Character> = setups.iter().flat_map(|setup| setup.cards.iter().copied()).collect();
        let mut deck = Deck::new(&excluded, rng)?;

        let mut players = Vec::with_capacity(setups.len());
        for setup in setups {
            let mut player = Player::new(setup.name, setup.coins.unwrap_or(STARTING_COINS));
            for character in setup.cards {
                player.draw_card(character);
            }
            while player.cards.len() < HAND_SIZE {
                player.draw_card(deck.draw()?);
            }
            players.push(player);
        }

        log::debug!("new game with {} players, {} cards in the deck", players.len(), deck.len());

        Ok(Self {
            turn: 0,
            state: State::AwaitingPrimaryAction,
            rotation: Rotation::new(players.len()),
            players,
            deck,
            faulted: false,
        })
    }

    pub fn from_setup(setup: Setup) -> Result<Self, CoupError> {
        let seed = setup.seed.unwrap_or_else(|| rand::thread_rng().gen());
        log::debug!("seeding deck with {seed}");
        Self::new(setup.players, Pcg64::seed_from_u64(seed))
    }

    /// Players with the given names and fresh hands, dealt from a seeded deck.
    pub fn with_names(names: &[&str], seed: u64) -> Result<Self, CoupError> {
        let setups = names.iter().map(|&name| PlayerSetup::new(name)).collect();
        Self::new(setups, Pcg64::seed_from_u64(seed))
    }

    pub fn state(&self) -> StateName {
        self.state.name()
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn current_player(&self) -> &str {
        &self.players[self.rotation.current()].name
    }

    pub fn winner(&self) -> Option<&str> {
        match self.state {
            State::GameOver { winner } => Some(&self.players[winner].name),
            _ => None,
        }
    }

    /// Any roster member, eliminated or not.
    pub fn player(&self, name: &str) -> Option<PlayerView> {
        self.players.iter().find(|player| player.name == name).map(PlayerView::from)
    }

    pub fn players(&self) -> Vec<PlayerView> {
        self.players.iter().map(PlayerView::from).collect()
    }

    pub fn active_players(&self) -> Vec<&str> {
        self.rotation
            .members()
            .iter()
            .map(|&idx| self.players[idx].name.as_str())
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state(),
            turn: self.turn,
            current_player: self.current_player().to_string(),
            winner: self.winner().map(str::to_string),
            players: self.players(),
        }
    }

    /// Copies of each character across the deck and every hand, face-up or not.
    pub fn census(&self) -> [(Character, usize); 5] {
        CHARACTER_VARIANTS.map(|character| {
            let held: usize = self.players.iter().map(|player| player.count(character)).sum();
            (character, self.deck.count(character) + held)
        })
    }

    /// Triggers reachable from the current state. Primary actions the current player
    /// cannot afford, or may not take while forced to coup, are left out.
    pub fn legal_moves(&self) -> BTreeSet<Trigger> {
        if self.faulted {
            return BTreeSet::new();
        }

        let coins = self.players[self.rotation.current()].coins;
        transitions()
            .triggers(self.state.name())
            .into_iter()
            .filter(|trigger| match trigger.primary() {
                Some(action) => coins >= action.cost && (coins < FORCED_COUP_COINS || *trigger == Trigger::Coup),
                None => true,
            })
            .collect()
    }

    /// Every concrete move, arguments included, that the engine would accept right now.
    pub fn candidate_moves(&self) -> Vec<(Trigger, MoveArgs)> {
        let actor = self.rotation.current();
        let mut moves = Vec::with_capacity(self.players.len() * 2);

        for trigger in self.legal_moves() {
            match (self.state, trigger) {
                (State::AwaitingPrimaryAction, Trigger::Coup | Trigger::Assassinate | Trigger::Steal) => {
                    for opponent in self.rotation.others(actor) {
                        moves.push((trigger, MoveArgs::target(self.players[opponent].name.clone())));
                    }
                }
                (_, Trigger::BlockForeignAid) => {
                    for opponent in self.rotation.others(actor) {
                        moves.push((trigger, MoveArgs::blocker(self.players[opponent].name.clone())));
                    }
                }
                (_, Trigger::BlockSteal) => {
                    moves.push((trigger, MoveArgs::none().with_claim(Captain)));
                    moves.push((trigger, MoveArgs::none().with_claim(Ambassador)));
                }
                (State::AwaitingForeignAidBlockChallenge { blocker }, Trigger::ChallengeBlockForeignAid)
                | (State::AwaitingAssassinateBlockChallenge { target: blocker }, Trigger::ChallengeBlockAssassinate)
                | (State::AwaitingStealBlockChallenge { target: blocker, .. }, Trigger::ChallengeBlockSteal) => {
                    for challenger in self.rotation.others(blocker) {
                        moves.push((trigger, MoveArgs::challenger(self.players[challenger].name.clone())));
                    }
                }
                (_, Trigger::ChallengeDuke | Trigger::ChallengeAssassin | Trigger::ChallengeCaptain | Trigger::ChallengeAmbassador) => {
                    for challenger in self.rotation.others(actor) {
                        moves.push((trigger, MoveArgs::challenger(self.players[challenger].name.clone())));
                    }
                }
                (_, Trigger::ReturnCards) => {
                    let hidden: Vec<Character> = self.players[actor].hidden().collect();
                    let mut pairs = BTreeSet::new();
                    for i in 0..hidden.len() {
                        for j in (i + 1)..hidden.len() {
                            pairs.insert((hidden[i].min(hidden[j]), hidden[i].max(hidden[j])));
                        }
                    }
                    for (a, b) in pairs {
                        moves.push((trigger, MoveArgs::cards([a, b])));
                    }
                }
                _ => moves.push((trigger, MoveArgs::none())),
            }
        }

        moves
    }

    /// Applies a move to a copy of the session. `self` is never touched, so a rejected
    /// move leaves nothing behind.
    pub fn apply(&self, trigger: Trigger, args: &MoveArgs) -> Result<Coup, CoupError> {
        if self.faulted {
            return Err(CoupError::Faulted);
        }

        let state = self.state.name();
        if !transitions().allows(state, trigger) {
            return Err(CoupError::IllegalMove { trigger, state });
        }

        let mut game = self.clone();
        game.state = game.dispatch(trigger, args)?;
        Ok(game)
    }

    /// The move boundary: commits the move on success, otherwise reports why it was
    /// rejected. A consistency fault poisons the session for good.
    pub fn apply_move(&mut self, trigger: Trigger, args: MoveArgs) -> Result<MoveOutcome, CoupError> {
        match self.apply(trigger, &args) {
            Ok(game) => {
                log::debug!("{} -> {trigger} -> {}", self.state.name(), game.state.name());
                *self = game;
                Ok(MoveOutcome {
                    state: self.state(),
                    players: self.players(),
                })
            }
            Err(err) if err.is_fatal() => {
                log::error!("{trigger} hit a consistency fault: {err}");
                self.faulted = true;
                Err(err)
            }
            Err(err) => {
                log::warn!("rejected {trigger}: {err}");
                Err(err)
            }
        }
    }

    fn dispatch(&mut self, trigger: Trigger, args: &MoveArgs) -> Result<State, CoupError> {
        let actor = self.rotation.current();

        match (self.state, trigger) {
            (State::AwaitingPrimaryAction, _) => self.primary(actor, trigger, args),

            // foreign aid
            (State::AwaitingForeignAidBlock, Trigger::DeclineBlockForeignAid) => self.proceed(Effect::ForeignAid),
            (State::AwaitingForeignAidBlock, Trigger::BlockForeignAid) => {
                let blocker = match args.blocker.as_deref() {
                    Some(name) => self.find_active(name)?,
                    None => self.sole_opponent(actor, "blocker")?,
                };
                if blocker == actor {
                    return Err(CoupError::precondition(format!("{} cannot block their own foreign aid", self.name(actor))));
                }
                log::debug!("{} blocks foreign aid claiming {}", self.name(blocker), Duke);
                Ok(State::AwaitingForeignAidBlockChallenge { blocker })
            }
            (State::AwaitingForeignAidBlockChallenge { blocker }, Trigger::ChallengeBlockForeignAid) => {
                let challenge = self.block_challenge(args, blocker, Duke)?;
                self.resolve_challenge(challenge, Effect::Cancel, Effect::ForeignAid)
            }
            (State::AwaitingForeignAidBlockChallenge { .. }, Trigger::DeclineChallengeBlockForeignAid) => self.proceed(Effect::Cancel),

            // tax
            (State::AwaitingTaxChallenge, Trigger::ChallengeDuke) => {
                let challenge = self.action_challenge(args, Trigger::Tax)?;
                self.resolve_challenge(challenge, Effect::Tax, Effect::Cancel)
            }
            (State::AwaitingTaxChallenge, Trigger::DeclineChallengeDuke) => self.proceed(Effect::Tax),

            // assassinate
            (State::AwaitingAssassinateBlock { target }, Trigger::ChallengeAssassin) => {
                let challenge = self.action_challenge(args, Trigger::Assassinate)?;
                self.resolve_challenge(challenge, Effect::Assassinate { target }, Effect::Cancel)
            }
            (State::AwaitingAssassinateBlock { target }, Trigger::BlockAssassinate) => {
                self.check_blocker(args, target)?;
                log::debug!("{} blocks the assassination claiming {}", self.name(target), Contessa);
                Ok(State::AwaitingAssassinateBlockChallenge { target })
            }
            (State::AwaitingAssassinateBlock { target }, Trigger::DeclineBlockAssassinate) => self.proceed(Effect::Assassinate { target }),
            (State::AwaitingAssassinateBlockChallenge { target }, Trigger::ChallengeBlockAssassinate) => {
                let challenge = self.block_challenge(args, target, Contessa)?;
                self.resolve_challenge(challenge, Effect::Cancel, Effect::Assassinate { target })
            }
            (State::AwaitingAssassinateBlockChallenge { .. }, Trigger::DeclineChallengeBlockAssassinate) => self.proceed(Effect::Cancel),

            // steal
            (State::AwaitingStealBlock { target }, Trigger::ChallengeCaptain) => {
                let challenge = self.action_challenge(args, Trigger::Steal)?;
                self.resolve_challenge(challenge, Effect::Steal { target }, Effect::Cancel)
            }
            (State::AwaitingStealBlock { target }, Trigger::BlockSteal) => {
                self.check_blocker(args, target)?;
                let claim = args.claim.unwrap_or(Captain);
                let blockable = Trigger::Steal.primary().map_or(false, |action| action.blockable_by.contains(&claim));
                if !blockable {
                    return Err(CoupError::precondition(format!("{claim} cannot block a steal")));
                }
                log::debug!("{} blocks the steal claiming {claim}", self.name(target));
                Ok(State::AwaitingStealBlockChallenge { target, claim })
            }
            (State::AwaitingStealBlock { target }, Trigger::DeclineBlockSteal) => self.proceed(Effect::Steal { target }),
            (State::AwaitingStealBlockChallenge { target, claim }, Trigger::ChallengeBlockSteal) => {
                let challenge = self.block_challenge(args, target, claim)?;
                self.resolve_challenge(challenge, Effect::Cancel, Effect::Steal { target })
            }
            (State::AwaitingStealBlockChallenge { .. }, Trigger::DeclineChallengeBlockSteal) => self.proceed(Effect::Cancel),

            // exchange
            (State::AwaitingExchangeChallenge, Trigger::ChallengeAmbassador) => {
                let challenge = self.action_challenge(args, Trigger::Exchange)?;
                self.resolve_challenge(challenge, Effect::Exchange, Effect::Cancel)
            }
            (State::AwaitingExchangeChallenge, Trigger::DeclineChallengeAmbassador) => self.proceed(Effect::Exchange),
            (State::AwaitingExchangeReturn, Trigger::ReturnCards) => {
                self.return_cards(actor, &args.cards)?;
                self.enter_turn()
            }

            (state, trigger) => Err(CoupError::IllegalMove { trigger, state: state.name() }),
        }
    }

    fn primary(&mut self, actor: usize, trigger: Trigger, args: &MoveArgs) -> Result<State, CoupError> {
        let action = trigger.primary().ok_or(CoupError::IllegalMove { trigger, state: self.state.name() })?;
        let coins = self.players[actor].coins;

        if coins >= FORCED_COUP_COINS && trigger != Trigger::Coup {
            return Err(CoupError::precondition(format!("{} has {coins} coins and must coup", self.name(actor))));
        }
        if coins < action.cost {
            return Err(CoupError::precondition(format!(
                "{trigger} costs {} coins, {} has {coins}",
                action.cost,
                self.name(actor)
            )));
        }

        let target = if action.targeted {
            let name = args.target.as_deref().ok_or_else(|| CoupError::precondition(format!("{trigger} needs a target")))?;
            let target = self.find_active(name)?;
            if target == actor {
                return Err(CoupError::precondition(format!("{} cannot {trigger} themselves", self.name(actor))));
            }
            Some(target)
        } else {
            None
        };

        self.players[actor].coins -= action.cost;
        match target {
            Some(target) => log::debug!("{} proposes {trigger} against {}", self.name(actor), self.name(target)),
            None => log::debug!("{} proposes {trigger}", self.name(actor)),
        }

        match (trigger, target) {
            (Trigger::Income, _) => {
                self.players[actor].coins += 1;
                self.enter_turn()
            }
            (Trigger::Coup, Some(target)) => {
                self.lose_influence(target, None)?;
                self.enter_turn()
            }
            (Trigger::ForeignAid, _) => Ok(State::AwaitingForeignAidBlock),
            (Trigger::Tax, _) => Ok(State::AwaitingTaxChallenge),
            (Trigger::Assassinate, Some(target)) => Ok(State::AwaitingAssassinateBlock { target }),
            (Trigger::Steal, Some(target)) => Ok(State::AwaitingStealBlock { target }),
            (Trigger::Exchange, _) => Ok(State::AwaitingExchangeChallenge),
            _ => Err(CoupError::IllegalMove { trigger, state: self.state.name() }),
        }
    }

    /// Settles a challenge. An upheld claim costs the challenger an influence, recycles
    /// the shown card and carries on with `on_upheld`; a bluff costs the claimant an
    /// influence and carries on with `on_disproved`.
    fn resolve_challenge(&mut self, challenge: Challenge, on_upheld: Effect, on_disproved: Effect) -> Result<State, CoupError> {
        let Challenge { challenged, challenger, claim, reveal } = challenge;
        log::debug!("{} challenges {}'s {claim}", self.name(challenger), self.name(challenged));

        match self.players[challenged].show(claim) {
            Some(card) => {
                log::debug!("{} shows {claim}, the challenge fails", self.name(challenged));
                self.lose_influence(challenger, reveal)?;
                self.deck.return_to_deck(card.character);
                let replacement = self.deck.draw()?;
                self.players[challenged].draw_card(replacement);
                self.proceed(on_upheld)
            }
            None => {
                log::debug!("{} was bluffing {claim}", self.name(challenged));
                self.lose_influence(challenged, None)?;
                self.proceed(on_disproved)
            }
        }
    }

    fn proceed(&mut self, effect: Effect) -> Result<State, CoupError> {
        let actor = self.rotation.current();

        match effect {
            Effect::ForeignAid => self.players[actor].coins += 2,
            Effect::Tax => self.players[actor].coins += 3,
            Effect::Assassinate { target } => {
                // target could already be out from losing a challenge
                if self.rotation.contains(target) {
                    self.lose_influence(target, None)?;
                }
            }
            Effect::Steal { target } => {
                let amount = self.players[target].coins.min(STEAL_AMOUNT);
                self.players[target].coins -= amount;
                self.players[actor].coins += amount;
                log::debug!("{} steals {amount} from {}", self.name(actor), self.name(target));
            }
            Effect::Exchange => {
                for _ in 0..EXCHANGE_DRAW {
                    let card = self.deck.draw()?;
                    self.players[actor].draw_card(card);
                }
                return Ok(State::AwaitingExchangeReturn);
            }
            Effect::Cancel => log::debug!("{}'s action is cancelled", self.name(actor)),
        }

        self.enter_turn()
    }

    fn return_cards(&mut self, actor: usize, cards: &[Character]) -> Result<(), CoupError> {
        if cards.len() != EXCHANGE_DRAW {
            return Err(CoupError::precondition(format!(
                "an exchange returns exactly {EXCHANGE_DRAW} cards, {} given",
                cards.len()
            )));
        }

        for &character in cards {
            let card = self.players[actor].show(character).ok_or_else(|| {
                CoupError::precondition(format!("{} has no face-down {character} to return", self.name(actor)))
            })?;
            self.deck.return_to_deck(card.character);
        }

        Ok(())
    }

    fn lose_influence(&mut self, player_idx: usize, preferred: Option<Character>) -> Result<(), CoupError> {
        let player = &mut self.players[player_idx];
        let character = player.reveal_card(preferred)?;
        log::debug!("{} loses influence, revealing {character}", player.name);

        if player.is_eliminated() {
            log::info!("{} is eliminated", player.name);
            self.rotation.eliminate(player_idx);
        }

        Ok(())
    }

    // re-entry into awaiting_primary_action: next player's turn, or the end of the game
    fn enter_turn(&mut self) -> Result<State, CoupError> {
        let remaining = self.rotation.len();
        let next = self.rotation.advance()?;

        if remaining == 1 {
            log::info!("game over, {} wins", self.name(next));
            return Ok(State::GameOver { winner: next });
        }

        self.turn += 1;
        log::debug!("turn {}: {} to act", self.turn, self.name(next));
        Ok(State::AwaitingPrimaryAction)
    }

    fn action_challenge(&self, args: &MoveArgs, action: Trigger) -> Result<Challenge, CoupError> {
        let actor = self.rotation.current();
        let claim = action
            .primary()
            .and_then(|action| action.claim)
            .ok_or_else(|| CoupError::precondition(format!("{action} claims no character")))?;

        let challenger = match args.challenger.as_deref() {
            Some(name) => self.find_active(name)?,
            None => self.sole_opponent(actor, "challenger")?,
        };
        if challenger == actor {
            return Err(CoupError::precondition(format!("{} cannot challenge their own claim", self.name(actor))));
        }

        Ok(Challenge { challenged: actor, challenger, claim, reveal: args.reveal })
    }

    fn block_challenge(&self, args: &MoveArgs, blocker: usize, claim: Character) -> Result<Challenge, CoupError> {
        // the blocked player challenges unless someone else is named
        let challenger = match args.challenger.as_deref() {
            Some(name) => self.find_active(name)?,
            None => self.rotation.current(),
        };
        if challenger == blocker {
            return Err(CoupError::precondition(format!("{} cannot challenge their own block", self.name(blocker))));
        }

        Ok(Challenge { challenged: blocker, challenger, claim, reveal: args.reveal })
    }

    fn check_blocker(&self, args: &MoveArgs, target: usize) -> Result<(), CoupError> {
        if let Some(name) = args.blocker.as_deref() {
            if self.find_active(name)? != target {
                return Err(CoupError::precondition(format!("only {} can block", self.name(target))));
            }
        }
        Ok(())
    }

    fn sole_opponent(&self, player_idx: usize, role: &str) -> Result<usize, CoupError> {
        match self.rotation.others(player_idx).as_slice() {
            [only] => Ok(*only),
            _ => Err(CoupError::precondition(format!("a {role} must be named"))),
        }
    }

    fn find_active(&self, name: &str) -> Result<usize, CoupError> {
        self.players
            .iter()
            .position(|player| player.name == name)
            .filter(|&idx| self.rotation.contains(idx))
            .ok_or_else(|| CoupError::UnknownPlayer(name.to_string()))
    }

    fn name(&self, player_idx: usize) -> &str {
        &self.players[player_idx].name
    }
}
