//! Composable decision trees evaluated once per tick.
//! Composite nodes only orchestrate; every state change happens inside leaf actions.

/// A leaf behaviour run against some mutable context.
pub trait BehaviorAction<C> {
    fn run(&self, ctx: &mut C) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BehaviorNode<A> {
    /// Succeeds on the first succeeding child.
    Selector(Vec<BehaviorNode<A>>),
    /// Fails on the first failing child.
    Sequence(Vec<BehaviorNode<A>>),
    Inverter(Box<BehaviorNode<A>>),
    Action(A),
}

impl<A> BehaviorNode<A> {
    pub fn run<C>(&self, ctx: &mut C) -> bool
    where
        A: BehaviorAction<C>,
    {
        match self {
            Self::Selector(children) => children.iter().any(|child| child.run(ctx)),
            Self::Sequence(children) => children.iter().all(|child| child.run(ctx)),
            Self::Inverter(child) => !child.run(ctx),
            Self::Action(action) => action.run(ctx),
        }
    }
}
