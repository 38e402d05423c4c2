use super::state::State;
use crate::errors::SimErrors;
use nalgebra as na;

/// Time-indexed record of a body's state, stored as three parallel sequences
/// (epochs, Cartesian states, orbital elements) that always share one length.
#[derive(Debug, Clone, Default)]
pub struct StateHistory {
    epochs: Vec<f64>,
    cartesian: Vec<na::Vector6<f64>>,
    elements: Vec<na::Vector6<f64>>,
}

impl StateHistory {
    /// A history holding only `state`.
    pub fn new(state: &State) -> Self {
        let mut history = Self::default();
        history.reset(state);
        history
    }

    /// Discards every entry and starts over from `state`.
    pub fn reset(&mut self, state: &State) {
        self.epochs = vec![state.epoch];
        self.cartesian = vec![state.cartesian()];
        self.elements = vec![state.coe().to_vector()];
    }

    /// Appends `state` as the newest entry.
    pub fn push(&mut self, state: &State) -> Result<(), SimErrors> {
        self.epochs.push(state.epoch);
        self.cartesian.push(state.cartesian());
        self.elements.push(state.coe().to_vector());
        self.check_consistency()
    }

    pub fn check_consistency(&self) -> Result<(), SimErrors> {
        let (epochs, cartesian, elements) =
            (self.epochs.len(), self.cartesian.len(), self.elements.len());
        if epochs != cartesian || epochs != elements {
            return Err(SimErrors::HistoryLengthMismatch {
                epochs,
                cartesian,
                elements,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn epochs(&self) -> &[f64] {
        &self.epochs
    }

    pub fn cartesian(&self) -> &[na::Vector6<f64>] {
        &self.cartesian
    }

    pub fn elements(&self) -> &[na::Vector6<f64>] {
        &self.elements
    }

    pub fn first_epoch(&self) -> Option<f64> {
        self.epochs.first().copied()
    }

    pub fn last_epoch(&self) -> Option<f64> {
        self.epochs.last().copied()
    }

    /// Position of entry `index`.
    pub fn position(&self, index: usize) -> Option<na::Vector3<f64>> {
        self.cartesian
            .get(index)
            .map(|cart| cart.fixed_rows::<3>(0).into_owned())
    }

    /// Iterates over `(epoch, cartesian, elements)` rows, oldest first.
    pub fn rows(
        &self,
    ) -> impl Iterator<Item = (f64, &na::Vector6<f64>, &na::Vector6<f64>)> + '_ {
        self.epochs
            .iter()
            .zip(self.cartesian.iter())
            .zip(self.elements.iter())
            .map(|((&et, cart), coe)| (et, cart, coe))
    }

    /// Finds the entry bracketing `target` by scanning backward from the newest
    /// entry for a sign change of `target - epoch[i]`.
    ///
    /// Returns the lower bracket (or the exact entry if `target` matches one),
    /// 0 if `target` precedes the first entry, and an error if `target` lies
    /// past the newest entry in the propagation direction.
    pub fn epoch_index(&self, target: f64) -> Result<usize, SimErrors> {
        let (first, last) = match (self.first_epoch(), self.last_epoch()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(SimErrors::EpochOutOfBounds {
                    target,
                    earliest: f64::NAN,
                    latest: f64::NAN,
                })
            }
        };

        let direction = if last >= first { 1.0 } else { -1.0 };
        if (target - last) * direction > 0.0 {
            return Err(SimErrors::EpochOutOfBounds {
                target,
                earliest: first,
                latest: last,
            });
        }
        if (target - first) * direction <= 0.0 {
            return Ok(0);
        }

        let offset = |i: usize| (target - self.epochs[i]) * direction;
        let mut prev_ahead = offset(self.len() - 1) > 0.0;
        for i in (0..self.len()).rev() {
            let d = offset(i);
            if d == 0.0 {
                return Ok(i);
            }
            let ahead = d > 0.0;
            if ahead != prev_ahead {
                return Ok(i);
            }
            prev_ahead = ahead;
        }
        Ok(0)
    }
}
