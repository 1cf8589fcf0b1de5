use std::{collections::HashMap, hash::Hash, str::FromStr};

use super::parse::{self, ParseError};

/// Item stored in a [`WeightedSelector`] together with its configured weight.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Weighted<T> {
    item: T,
    weight: i64,
}

/// Classical LVS Weighted Round Robin (WRR) algorithm.
///
/// Items are picked proportionally to their weight. Every full pass over the
/// item list lowers the current weight by the GCD of all positive weights, so
/// heavier items are admitted on more passes than lighter ones. Only integer
/// arithmetic is used and the state carried between calls is a cursor and the
/// current weight.
///
/// Items with a weight of zero or less are kept in the list but are never
/// picked, unless they are the only item.
///
/// The selector has no internal locking. Sharing it between threads requires
/// an external lock, see [`crate::SharedSelector`].
///
/// See <http://kb.linuxvirtualserver.org/wiki/Weighted_Round-Robin_Scheduling>.
#[derive(Debug, Clone)]
pub struct WeightedSelector<T> {
    items: Vec<Weighted<T>>,
    /// GCD of all positive weights, 0 while there are none.
    gcd: i64,
    /// Greatest positive weight, 0 while there are none.
    max_weight: i64,
    /// Last examined position. `None` before the first pick of a cycle.
    cursor: Option<usize>,
    current_weight: i64,
    /// Inline source of the last successful [`WeightedSelector::add_from`].
    source: Option<String>,
}

impl<T> Default for WeightedSelector<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            gcd: 0,
            max_weight: 0,
            cursor: None,
            current_weight: 0,
            source: None,
        }
    }
}

impl<T> WeightedSelector<T> {
    /// Creates an empty [`WeightedSelector`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` with the given `weight`.
    pub fn add(&mut self, item: T, weight: i64) {
        if weight > 0 {
            if self.gcd == 0 {
                self.gcd = weight;
                self.max_weight = weight;
                self.reset();
            } else {
                self.gcd = gcd(self.gcd, weight);
                self.max_weight = self.max_weight.max(weight);
            }
        }

        self.items.push(Weighted { item, weight });
    }

    /// Returns the next selected item, or `None` when nothing is selectable.
    ///
    /// `None` is returned for an empty selector and for a selector with
    /// several items none of which has a positive weight.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        let n = self.items.len();

        match n {
            0 => return None,
            1 => return Some(&self.items[0].item),
            _ => {}
        }

        loop {
            let i = self.cursor.map_or(0, |i| (i + 1) % n);
            self.cursor = Some(i);

            if i == 0 {
                self.current_weight -= self.gcd;
                if self.current_weight <= 0 {
                    self.current_weight = self.max_weight;
                    if self.current_weight == 0 {
                        // Restart from the first item so zero weights never
                        // match a zero current weight on the next call.
                        self.reset();
                        return None;
                    }
                }
            }

            if self.items[i].weight >= self.current_weight {
                return Some(&self.items[i].item);
            }
        }
    }

    /// Rewinds the cycle so that the following picks start over. Items and
    /// weights are kept.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.current_weight = 0;
    }

    /// Removes every item and forgets all weights.
    pub fn remove_all(&mut self) {
        self.items.clear();
        self.gcd = 0;
        self.max_weight = 0;
        self.reset();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inline source string given to the last successful
    /// [`WeightedSelector::add_from`], if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl<T: Eq + Hash + Clone> WeightedSelector<T> {
    /// Snapshot of every item and its weight. For duplicated items the last
    /// added weight wins.
    pub fn all(&self) -> HashMap<T, i64> {
        self.items
            .iter()
            .map(|weighted| (weighted.item.clone(), weighted.weight))
            .collect()
    }
}

impl WeightedSelector<String> {
    /// Adds every item of an inline list such as `"a=5, b=1,c = 3"`.
    ///
    /// Parsing stops at the first malformed entry. Entries before it have
    /// already been added and stay in the selector.
    pub fn add_from(&mut self, source: &str) -> Result<(), ParseError> {
        for entry in parse::entries(source) {
            let (item, weight) = entry?;
            self.add(item.to_owned(), weight);
        }

        self.source = Some(source.to_owned());
        Ok(())
    }
}

impl FromStr for WeightedSelector<String> {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut selector = Self::new();
        selector.add_from(source)?;
        Ok(selector)
    }
}

/// Euclid's algorithm. Both operands are positive whenever it is called from
/// [`WeightedSelector::add`].
fn gcd(mut x: i64, mut y: i64) -> i64 {
    while y != 0 {
        (x, y) = (y, x % y);
    }

    x
}
