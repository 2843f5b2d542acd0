//! Lisp data types produced by the reader.
//!
//! An expression is a tree of owned nodes:
//! - `Nil`, the empty list
//! - `Integer`, an i64
//! - `Symbol`, an interned name (see [`Symbols`])
//! - `Pair`, a cons cell that owns its car and cdr
//!
//! A proper list is a chain of pairs whose last cdr is `Nil`;
//! a dotted list ends in anything else.
//! Trees are built front-to-back by the reader, so they are never cyclic.

mod list;
mod symbols;

pub use list::ListBuilder;
pub use symbols::{Symbol, Symbols};

pub type Integer = i64;

/// A Lisp expression.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Expr {
    #[default]
    Nil,
    Integer(Integer),
    Symbol(Symbol),
    Pair(Box<Pair>),
}

/// A cons cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub car: Expr,
    pub cdr: Expr,
}

impl Pair {
    pub fn cons(car: impl Into<Expr>, cdr: impl Into<Expr>) -> Self {
        Pair {
            car: car.into(),
            cdr: cdr.into(),
        }
    }
}

impl Expr {
    pub fn nil() -> Self {
        Expr::Nil
    }

    /// Allocate a new pair holding `car` and `cdr`.
    pub fn cons(car: impl Into<Expr>, cdr: impl Into<Expr>) -> Self {
        Expr::Pair(Box::new(Pair::cons(car, cdr)))
    }

    /// Build a proper list from the items, in order.
    pub fn list(items: impl IntoIterator<Item = Expr>) -> Self {
        let mut builder = ListBuilder::new();
        for item in items {
            builder.push_back(item);
        }
        builder.finish()
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Nil)
    }
    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Expr::Pair(_))
    }

    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Expr::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Expr::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Expr::Pair(p) => Some(p),
            _ => None,
        }
    }

    pub fn car(&self) -> Option<&Expr> {
        self.as_pair().map(|p| &p.car)
    }

    pub fn cdr(&self) -> Option<&Expr> {
        self.as_pair().map(|p| &p.cdr)
    }

    /// Iterate over the elements of a list.
    ///
    /// Iteration stops at the first cdr that is not a pair;
    /// for a dotted list, that tail is available from [`ListIter::tail`].
    pub fn iter(&self) -> ListIter<'_> {
        ListIter { next: self }
    }

    /// True if this is a chain of pairs ending in nil.
    pub fn is_proper_list(&self) -> bool {
        let mut it = self.iter();
        it.by_ref().for_each(drop);
        it.tail().is_nil()
    }

    /// A `Debug` view of this expression that shows symbol names
    /// rather than their interned indices.
    pub fn resolved<'a>(&'a self, symbols: &'a Symbols) -> Resolved<'a> {
        Resolved {
            expr: self,
            symbols,
        }
    }
}

/// Lists are dropped front-to-back, so a long cdr chain doesn't recurse.
/// Nested cars still recurse, bounded by nesting depth.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut next = match self {
            Expr::Pair(p) => std::mem::take(&mut p.cdr),
            _ => return,
        };
        while let Expr::Pair(p) = &mut next {
            let cdr = std::mem::take(&mut p.cdr);
            next = cdr;
        }
    }
}

impl From<Integer> for Expr {
    fn from(value: Integer) -> Self {
        Expr::Integer(value)
    }
}

impl From<Symbol> for Expr {
    fn from(value: Symbol) -> Self {
        Expr::Symbol(value)
    }
}

impl From<Pair> for Expr {
    fn from(value: Pair) -> Self {
        Expr::Pair(Box::new(value))
    }
}

/// Iterator over the cars of a list.
pub struct ListIter<'a> {
    next: &'a Expr,
}

impl<'a> ListIter<'a> {
    /// The part of the list not yet visited: nil at the end of a proper list.
    pub fn tail(&self) -> &'a Expr {
        self.next
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.next.as_pair()?;
        self.next = &pair.cdr;
        Some(&pair.car)
    }
}

static NIL: Expr = Expr::Nil;

/// Deconstruct a proper list of exactly N elements.
impl<'a, const N: usize> TryFrom<&'a Expr> for [&'a Expr; N] {
    type Error = String;

    fn try_from(expr: &'a Expr) -> Result<Self, Self::Error> {
        let mut result = [&NIL; N];
        let rest = result
            .iter_mut()
            .try_fold(expr, |list, slot| {
                let pair = list.as_pair()?;
                *slot = &pair.car;
                Some(&pair.cdr)
            })
            .ok_or_else(|| format!("not enough entries in list for {N} elements"))?;
        if !rest.is_nil() {
            return Err(format!("list has more than {N} elements"));
        }
        Ok(result)
    }
}

/// Debug rendering with resolved symbol names.
pub struct Resolved<'a> {
    expr: &'a Expr,
    symbols: &'a Symbols,
}

impl std::fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.expr {
            Expr::Nil => f.write_str("Nil"),
            Expr::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
            Expr::Symbol(s) => match self.symbols.resolve(*s) {
                Some(name) => f.debug_tuple("Symbol").field(&name).finish(),
                None => f.debug_tuple("Symbol").field(s).finish(),
            },
            Expr::Pair(p) => f
                .debug_struct("Pair")
                .field("car", &p.car.resolved(self.symbols))
                .field("cdr", &p.cdr.resolved(self.symbols))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_right_leaning() {
        let list = Expr::list([1i64, 2, 3].map(Expr::from));
        let want = Expr::cons(1i64, Expr::cons(2i64, Expr::cons(3i64, Expr::Nil)));
        assert_eq!(list, want);
        assert!(list.is_proper_list());
    }

    #[test]
    fn empty_list_is_nil() {
        assert!(Expr::list(Vec::new()).is_nil());
        assert!(Expr::Nil.is_proper_list());
    }

    #[test]
    fn iterate_dotted_list() {
        let dotted = Expr::cons(1i64, Expr::cons(2i64, 3i64));
        assert_eq!(dotted.car(), Some(&Expr::Integer(1)));
        assert!(dotted.cdr().is_some_and(Expr::is_pair));
        let mut it = dotted.iter();
        let got: Vec<i64> = it.by_ref().filter_map(Expr::as_integer).collect();
        assert_eq!(&got, &[1, 2]);
        assert_eq!(it.tail(), &Expr::Integer(3));
        assert!(!dotted.is_proper_list());
    }

    #[test]
    fn drop_long_list() {
        let list = Expr::list((0..1_000_000i64).map(Expr::from));
        assert_eq!(list.iter().count(), 1_000_000);
        drop(list);

        let mut dotted = ListBuilder::new();
        for i in 0..1_000_000i64 {
            dotted.push_back(Expr::list([Expr::from(i)]));
        }
        drop(dotted.append(Expr::cons(1i64, 2i64)));
    }

    #[test]
    fn get_list() {
        let list = Expr::list([4i64, 5, 6].map(Expr::from));
        let [a, b, c]: [&Expr; 3] = (&list).try_into().unwrap();
        assert_eq!(a.as_integer(), Some(4));
        assert_eq!(b.as_integer(), Some(5));
        assert_eq!(c.as_integer(), Some(6));

        let short: Result<[&Expr; 4], _> = (&list).try_into();
        short.expect_err("list of three should not fill four slots");
        let long: Result<[&Expr; 2], _> = (&list).try_into();
        long.expect_err("list of three should not fit in two slots");
    }

    #[test]
    fn resolved_debug_names_symbols() {
        let mut symbols = Symbols::default();
        let expr = Expr::list([symbols.symbol("hello"), Expr::from(7i64)]);
        let debug = format!("{:?}", expr.resolved(&symbols));
        assert!(debug.contains(r#"Symbol("hello")"#), "{debug}");
        assert!(debug.contains("Integer(7)"), "{debug}");
    }
}
