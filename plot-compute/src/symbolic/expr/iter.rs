use super::Expr;

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator rooted at the given expression.
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the children of the given list were all visited, or there are none.
    fn children_done(&self, children: &'a [Expr]) -> bool {
        children.last().map_or(true, |last| self.is_last_visited(last))
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Primary(super::Primary::Call(_, args)) => {
                    if self.children_done(args) {
                        return self.visit();
                    }
                    for arg in args.iter().rev() {
                        self.stack.push(arg);
                    }
                },
                Expr::Primary(_) => return self.visit(),
                Expr::Add(children) | Expr::Mul(children) => {
                    if self.children_done(children) {
                        return self.visit();
                    }
                    for child in children.iter().rev() {
                        self.stack.push(child);
                    }
                },
                Expr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}
