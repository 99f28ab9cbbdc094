//! Lattice methods for option pricing.
//!
//! * [`BinomialTree`] — recombining Cox-Ross-Rubinstein tree
//! * [`price_american`] — backward-induction pricing with early exercise
//!
//! The rollback keeps a single layer of `N + 1` values and overwrites it in
//! place, so memory is O(N).

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use op_core::Real;

fn terminal_values(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real) -> Vec<Real> {
    let n = tree.steps();
    (0..tree.size(n))
        .map(|j| payoff(tree.underlying(n, j)))
        .collect()
}

/// Price an American option by backward induction on a binomial tree.
///
/// Every node takes the larger of the discounted continuation value and the
/// immediate exercise value `payoff(S)`.
pub fn price_american(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real) -> Real {
    let (pu, pd, discount) = (tree.probability(1), tree.probability(0), tree.discount());
    let mut values = terminal_values(tree, payoff);

    for i in (0..tree.steps()).rev() {
        for j in 0..tree.size(i) {
            let hold = discount * (pu * values[j + 1] + pd * values[j]);
            let exercise = payoff(tree.underlying(i, j));
            values[j] = hold.max(exercise);
        }
    }

    values[0]
}
