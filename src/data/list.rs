//! Accumulating lists front-to-back.

use super::Expr;

/// Collects list elements in order, then links them into pairs.
///
/// Elements are held in a `Vec` until [`ListBuilder::finish`] or
/// [`ListBuilder::append`], which fold them right-to-left onto the tail;
/// building never needs to walk to the end of a partial list.
#[derive(Debug, Default)]
pub struct ListBuilder {
    items: Vec<Expr>,
}

impl ListBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an element at the end of the list.
    pub fn push_back(&mut self, expr: Expr) {
        self.items.push(expr);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Complete the list, with `tail` as the final cdr.
    ///
    /// A pair tail splices in: appending `(b . c)` to `(a)` gives `(a b . c)`.
    /// With no elements pushed, the result is `tail` itself.
    pub fn append(self, tail: Expr) -> Expr {
        self.items
            .into_iter()
            .rev()
            .fold(tail, |cdr, car| Expr::cons(car, cdr))
    }

    /// Complete the list as a proper list.
    pub fn finish(self) -> Expr {
        self.append(Expr::Nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order() {
        let mut builder = ListBuilder::new();
        for i in 1..=3i64 {
            builder.push_back(i.into());
        }
        assert_eq!(builder.len(), 3);
        let got: Vec<i64> = builder
            .finish()
            .iter()
            .filter_map(Expr::as_integer)
            .collect();
        assert_eq!(&got, &[1, 2, 3]);
    }

    #[test]
    fn append_pair_makes_dotted_list() {
        let mut builder = ListBuilder::new();
        builder.push_back(Expr::Integer(1));
        let list = builder.append(Expr::cons(2i64, 3i64));
        assert_eq!(list, Expr::cons(1i64, Expr::cons(2i64, 3i64)));
    }

    #[test]
    fn append_to_empty_is_tail() {
        let pair = Expr::cons(1i64, 2i64);
        assert_eq!(ListBuilder::new().append(pair.clone()), pair);
        assert!(ListBuilder::new().finish().is_nil());
    }
}
