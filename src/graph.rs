use std::collections::HashMap;
use std::sync::OnceLock;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use crate::action::Trigger;
use crate::state::{StateName, STATE_VARIANTS};

use StateName::*;

// (source, trigger, destination). Entering awaiting_primary_action with one player left
// diverts to game_over, which is why no edge names it.
static TRANSITIONS: &[(StateName, Trigger, StateName)] = &[
    (AwaitingPrimaryAction, Trigger::Income, AwaitingPrimaryAction),
    (AwaitingPrimaryAction, Trigger::Coup, AwaitingPrimaryAction),
    (AwaitingPrimaryAction, Trigger::ForeignAid, AwaitingForeignAidBlock),
    (AwaitingPrimaryAction, Trigger::Tax, AwaitingTaxChallenge),
    (AwaitingPrimaryAction, Trigger::Assassinate, AwaitingAssassinateBlock),
    (AwaitingPrimaryAction, Trigger::Steal, AwaitingStealBlock),
    (AwaitingPrimaryAction, Trigger::Exchange, AwaitingExchangeChallenge),

    (AwaitingForeignAidBlock, Trigger::DeclineBlockForeignAid, AwaitingPrimaryAction),
    (AwaitingForeignAidBlock, Trigger::BlockForeignAid, AwaitingForeignAidBlockChallenge),
    (AwaitingForeignAidBlockChallenge, Trigger::ChallengeBlockForeignAid, AwaitingPrimaryAction),
    (AwaitingForeignAidBlockChallenge, Trigger::DeclineChallengeBlockForeignAid, AwaitingPrimaryAction),

    (AwaitingTaxChallenge, Trigger::ChallengeDuke, AwaitingPrimaryAction),
    (AwaitingTaxChallenge, Trigger::DeclineChallengeDuke, AwaitingPrimaryAction),

    (AwaitingAssassinateBlock, Trigger::ChallengeAssassin, AwaitingPrimaryAction),
    (AwaitingAssassinateBlock, Trigger::BlockAssassinate, AwaitingAssassinateBlockChallenge),
    (AwaitingAssassinateBlock, Trigger::DeclineBlockAssassinate, AwaitingPrimaryAction),
    (AwaitingAssassinateBlockChallenge, Trigger::ChallengeBlockAssassinate, AwaitingPrimaryAction),
    (AwaitingAssassinateBlockChallenge, Trigger::DeclineChallengeBlockAssassinate, AwaitingPrimaryAction),

    (AwaitingStealBlock, Trigger::ChallengeCaptain, AwaitingPrimaryAction),
    (AwaitingStealBlock, Trigger::BlockSteal, AwaitingStealBlockChallenge),
    (AwaitingStealBlock, Trigger::DeclineBlockSteal, AwaitingPrimaryAction),
    (AwaitingStealBlockChallenge, Trigger::ChallengeBlockSteal, AwaitingPrimaryAction),
    (AwaitingStealBlockChallenge, Trigger::DeclineChallengeBlockSteal, AwaitingPrimaryAction),

    (AwaitingExchangeChallenge, Trigger::ChallengeAmbassador, AwaitingExchangeReturn),
    (AwaitingExchangeChallenge, Trigger::ChallengeAmbassador, AwaitingPrimaryAction),
    (AwaitingExchangeChallenge, Trigger::DeclineChallengeAmbassador, AwaitingExchangeReturn),
    (AwaitingExchangeReturn, Trigger::ReturnCards, AwaitingPrimaryAction),
];

/// The state machine's transition table as a graph, one node per state.
pub struct TransitionGraph {
    graph: DiGraph<StateName, Trigger>,
    nodes: HashMap<StateName, NodeIndex>,
}

impl TransitionGraph {
    fn build() -> Self {
        let mut graph = DiGraph::with_capacity(STATE_VARIANTS.len(), TRANSITIONS.len());
        let nodes: HashMap<StateName, NodeIndex> = STATE_VARIANTS
            .iter()
            .map(|&state| (state, graph.add_node(state)))
            .collect();

        for &(source, trigger, destination) in TRANSITIONS {
            graph.add_edge(nodes[&source], nodes[&destination], trigger);
        }

        Self { graph, nodes }
    }

    /// Triggers reachable from `state`, in declaration order and without duplicates.
    pub fn triggers(&self, state: StateName) -> Vec<Trigger> {
        let mut triggers: Vec<Trigger> = self.graph
            .edges(self.nodes[&state])
            .map(|edge| *edge.weight())
            .collect();
        triggers.sort();
        triggers.dedup();
        triggers
    }

    pub fn allows(&self, state: StateName, trigger: Trigger) -> bool {
        self.graph
            .edges(self.nodes[&state])
            .any(|edge| *edge.weight() == trigger)
    }

    pub fn destinations(&self, state: StateName, trigger: Trigger) -> Vec<StateName> {
        self.graph
            .edges(self.nodes[&state])
            .filter(|edge| *edge.weight() == trigger)
            .map(|edge| self.graph[edge.target()])
            .collect()
    }

    /// Graphviz source for the transition table.
    pub fn dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }
}

pub fn transitions() -> &'static TransitionGraph {
    static GRAPH: OnceLock<TransitionGraph> = OnceLock::new();
    GRAPH.get_or_init(TransitionGraph::build)
}
