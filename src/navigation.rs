use std::sync::Arc;

use crate::issue::IssueController;

/// Something detail controllers can be pushed onto
pub trait Navigator {
    fn push(&mut self, controller: Arc<IssueController>);
}

/// Stack of detail controllers above the issues list.
/// An empty stack means the list itself is showing.
#[derive(Debug, Default)]
pub struct NavigationStack {
    controllers: Vec<Arc<IssueController>>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<&Arc<IssueController>> {
        self.controllers.last()
    }

    pub fn pop(&mut self) -> Option<Arc<IssueController>> {
        self.controllers.pop()
    }

    pub fn depth(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_root(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl Navigator for NavigationStack {
    fn push(&mut self, controller: Arc<IssueController>) {
        self.controllers.push(controller);
    }
}
