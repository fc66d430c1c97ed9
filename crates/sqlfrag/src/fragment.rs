//! The fragment contract and the sequencer that joins fragments into clauses.
//!
//! Every composable piece of a statement (raw expressions, predicate maps,
//! conjunctions, whole sub-selects) implements [`Fragment`]. Rendered text
//! always carries the neutral `?` marker; only the outermost statement rewrites
//! markers into the configured [`PlaceholderFormat`](crate::PlaceholderFormat).

use crate::error::QbResult;
use crate::expr::Part;
use crate::param::ParamList;
use std::sync::Arc;

/// A renderable unit producing SQL text and its bound arguments.
pub trait Fragment: Send + Sync {
    /// Render to SQL text with `?` markers plus the arguments in marker order.
    fn render(&self) -> QbResult<(String, ParamList)>;
}

impl<F: Fragment + ?Sized> Fragment for Arc<F> {
    fn render(&self) -> QbResult<(String, ParamList)> {
        (**self).render()
    }
}

impl<F: Fragment + ?Sized> Fragment for Box<F> {
    fn render(&self) -> QbResult<(String, ParamList)> {
        (**self).render()
    }
}

/// Render `parts` into `out`, joined by `sep`.
///
/// Parts rendering to empty text are skipped and never produce a dangling
/// separator. Arguments of every part are appended in source order.
pub(crate) fn append_to_sql<'a, F, I>(
    parts: I,
    out: &mut String,
    sep: &str,
    params: &mut ParamList,
) -> QbResult<()>
where
    F: Fragment + ?Sized + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut wrote_any = false;
    for part in parts {
        let (sql, args) = part.render()?;
        params.append(args);
        if sql.is_empty() {
            continue;
        }
        if wrote_any {
            out.push_str(sep);
        }
        out.push_str(&sql);
        wrote_any = true;
    }
    Ok(())
}

/// Render a keyword-introduced clause such as `WHERE` or `HAVING`.
///
/// `lead` is written before the clause text (e.g. `" WHERE "`). When every
/// part renders empty the whole clause, keyword included, is omitted.
pub(crate) fn append_clause<'a, F, I>(
    lead: &str,
    parts: I,
    out: &mut String,
    sep: &str,
    params: &mut ParamList,
) -> QbResult<()>
where
    F: Fragment + ?Sized + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut body = String::new();
    append_to_sql(parts, &mut body, sep, params)?;
    if !body.is_empty() {
        out.push_str(lead);
        out.push_str(&body);
    }
    Ok(())
}

/// An ordered list of fragments rendered with a separator.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    parts: Vec<Part>,
    sep: String,
}

impl Sequence {
    /// Create a sequence joined by `sep`.
    pub fn new(parts: Vec<Part>, sep: impl Into<String>) -> Self {
        Self {
            parts,
            sep: sep.into(),
        }
    }

    /// Number of child fragments (including ones that render empty).
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Fragment for Sequence {
    fn render(&self) -> QbResult<(String, ParamList)> {
        let mut sql = String::new();
        let mut params = ParamList::new();
        append_to_sql(&self.parts, &mut sql, &self.sep, &mut params)?;
        Ok((sql, params))
    }
}
