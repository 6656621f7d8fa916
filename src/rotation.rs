use crate::CoupError;

/// Active players in seating order plus whose turn it is. Members are roster indexes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotation {
    members: Vec<usize>,
    current: usize,
}

impl Rotation {
    pub fn new(num_players: usize) -> Self {
        Self {
            members: (0..num_players).collect(),
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, player_idx: usize) -> bool {
        self.members.contains(&player_idx)
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Moves to the next active seat after the current one. The current player may
    /// already have been spliced out, in which case their seat is still the reference.
    pub fn advance(&mut self) -> Result<usize, CoupError> {
        let next = self.members
            .iter()
            .copied()
            .find(|&idx| idx > self.current)
            .or_else(|| self.members.first().copied())
            .ok_or(CoupError::RotationEmpty)?;

        self.current = next;
        Ok(next)
    }

    pub fn eliminate(&mut self, player_idx: usize) {
        self.members.retain(|&idx| idx != player_idx);
    }

    /// Active players after `player_idx` in seating order, wrapping, excluding `player_idx`.
    pub fn others(&self, player_idx: usize) -> Vec<usize> {
        let split = self.members.partition_point(|&idx| idx <= player_idx);
        self.members[split..]
            .iter()
            .chain(self.members[..split].iter())
            .copied()
            .filter(|&idx| idx != player_idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::rotation::Rotation;
    use crate::CoupError;

    #[test]
    fn next_actor() {
        let mut rotation = Rotation::new(4);
        assert_eq!(rotation.current(), 0);
        assert_eq!(rotation.advance(), Ok(1));
        assert_eq!(rotation.advance(), Ok(2));
        assert_eq!(rotation.advance(), Ok(3));
        assert_eq!(rotation.advance(), Ok(0));
    }

    #[test]
    fn skips_eliminated() {
        let mut rotation = Rotation::new(4);
        rotation.eliminate(1);
        assert_eq!(rotation.advance(), Ok(2));

        // the current player going out still hands the turn to their left
        rotation.eliminate(2);
        assert_eq!(rotation.advance(), Ok(3));
        rotation.eliminate(3);
        assert_eq!(rotation.advance(), Ok(0));
        assert_eq!(rotation.len(), 1);
    }

    #[test]
    fn empty() {
        let mut rotation = Rotation::new(2);
        rotation.eliminate(0);
        rotation.eliminate(1);
        assert!(rotation.is_empty());
        assert_eq!(rotation.advance(), Err(CoupError::RotationEmpty));
    }

    #[test]
    fn other_players() {
        let rotation = Rotation::new(4);
        assert_eq!(rotation.others(0), vec![1, 2, 3]);
        assert_eq!(rotation.others(1), vec![2, 3, 0]);

        let mut rotation = Rotation::new(3);
        assert_eq!(rotation.others(1), vec![2, 0]);
        rotation.eliminate(2);
        assert_eq!(rotation.others(1), vec![0]);
    }
}
