mod sealed {
    pub trait Sealed {}
}

/// Decides whether a [`SearchTree`](super::SearchTree) rebalances itself.
///
/// Both policies share the same insert and delete code. After every
/// structural change the tree walks from the changed node up to the root
/// refreshing cached heights; a self-balancing policy additionally rotates
/// any node whose subtrees differ in height by more than one.
///
/// This trait is sealed.
pub trait BalancePolicy: sealed::Sealed {
    /// Whether retracing performs rotations.
    const SELF_BALANCING: bool;

    /// Name used in log events.
    const NAME: &'static str;
}

/// Plain binary search tree: shape follows insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unbalanced;

impl sealed::Sealed for Unbalanced {}

impl BalancePolicy for Unbalanced {
    const SELF_BALANCING: bool = false;
    const NAME: &'static str = "unbalanced";
}

/// AVL balancing with single and double rotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Avl;

impl sealed::Sealed for Avl {}

impl BalancePolicy for Avl {
    const SELF_BALANCING: bool = true;
    const NAME: &'static str = "avl";
}
