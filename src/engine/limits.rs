//! Enforces the maximum selection depth configured in [`Limits`] before a query reaches the
//! executor. The relation fields of the schema form cycles (products to line items to products),
//! so without a limit a single request could ask for arbitrarily deep nesting.
//!
//! Depth counts fields: `{ products { ID } }` has a depth of two. Fragment spreads and inline
//! fragments add no depth of their own.
//!
//! [`Limits`]: ../config/struct.Limits.html

use crate::error::Error;
use apollo_parser::{cst, Parser};
use log::{debug, trace};
use std::collections::HashMap;

/// Measures the deepest selection of the operations in `query`. When `operation_name` is given
/// only the operation with that name is measured. Returns `Ok(None)` if the document has syntax
/// errors, leaving them to be reported by the executor.
///
/// # Errors
///
/// Returns a [`QueryNestingLimitReached`] error if the document nests past the parser's
/// recursion limit, since its depth cannot be measured.
///
/// [`QueryNestingLimitReached`]: ../../error/enum.Error.html#variant.QueryNestingLimitReached
///
/// # Examples
///
/// ```rust
/// use shopgraph::engine::limits::query_depth;
///
/// assert_eq!(Some(3), query_depth("{ shops { Products { ID } } }", None).unwrap());
/// ```
pub fn query_depth(query: &str, operation_name: Option<&str>) -> Result<Option<usize>, Error> {
    trace!("query_depth called -- operation_name: {:#?}", operation_name);

    let tree = Parser::new(query).parse();
    if tree.errors().any(|e| e.is_limit()) {
        let limit = tree.recursion_limit().limit;
        debug!("query_depth -- parser recursion limit of {} reached", limit);
        return Err(Error::QueryNestingLimitReached { limit });
    }
    if tree.errors().next().is_some() {
        debug!("query_depth -- skipping unparseable document");
        return Ok(None);
    }

    let document = tree.document();
    let fragments: HashMap<String, cst::SelectionSet> = document
        .definitions()
        .filter_map(|definition| match definition {
            cst::Definition::FragmentDefinition(fragment) => {
                let name = fragment.fragment_name()?.name()?.text().to_string();
                Some((name, fragment.selection_set()?))
            }
            _ => None,
        })
        .collect();

    let mut measure = DepthMeasure {
        fragments: &fragments,
        cache: HashMap::new(),
        visiting: Vec::new(),
    };

    let depth = document
        .definitions()
        .filter_map(|definition| match definition {
            cst::Definition::OperationDefinition(op) => Some(op),
            _ => None,
        })
        .filter(|op| match operation_name {
            Some(wanted) => op
                .name()
                .map(|n| n.text().to_string() == wanted)
                .unwrap_or(false),
            None => true,
        })
        .filter_map(|op| op.selection_set())
        .map(|selection_set| measure.selection_set(&selection_set))
        .max()
        .unwrap_or(0);

    Ok(Some(depth))
}

/// Returns a [`QueryDepthExceeded`] error if `query` nests deeper than `max_depth`, or a
/// [`QueryNestingLimitReached`] error if it nests too deeply to be measured at all. A `None`
/// limit accepts any depth.
///
/// [`QueryDepthExceeded`]: ../../error/enum.Error.html#variant.QueryDepthExceeded
/// [`QueryNestingLimitReached`]: ../../error/enum.Error.html#variant.QueryNestingLimitReached
pub fn check_depth(
    query: &str,
    operation_name: Option<&str>,
    max_depth: Option<usize>,
) -> Result<(), Error> {
    let max_depth = match max_depth {
        Some(max_depth) => max_depth,
        None => return Ok(()),
    };

    match query_depth(query, operation_name)? {
        Some(depth) if depth > max_depth => {
            debug!(
                "check_depth -- rejecting query of depth {} with limit {}",
                depth, max_depth
            );
            Err(Error::QueryDepthExceeded { depth, max_depth })
        }
        _ => Ok(()),
    }
}

struct DepthMeasure<'f> {
    fragments: &'f HashMap<String, cst::SelectionSet>,
    cache: HashMap<String, usize>,
    visiting: Vec<String>,
}

impl<'f> DepthMeasure<'f> {
    fn selection_set(&mut self, selection_set: &cst::SelectionSet) -> usize {
        selection_set
            .selections()
            .map(|selection| match selection {
                cst::Selection::Field(field) => {
                    1 + field
                        .selection_set()
                        .map(|nested| self.selection_set(&nested))
                        .unwrap_or(0)
                }
                cst::Selection::InlineFragment(inline) => inline
                    .selection_set()
                    .map(|nested| self.selection_set(&nested))
                    .unwrap_or(0),
                cst::Selection::FragmentSpread(spread) => spread
                    .fragment_name()
                    .and_then(|f| f.name())
                    .map(|n| self.fragment(&n.text().to_string()))
                    .unwrap_or(0),
            })
            .max()
            .unwrap_or(0)
    }

    fn fragment(&mut self, name: &str) -> usize {
        if let Some(depth) = self.cache.get(name) {
            return *depth;
        }

        // Cyclic spreads are rejected by validation; count them as empty here
        if self.visiting.iter().any(|v| v == name) {
            return 0;
        }

        let selection_set = match self.fragments.get(name) {
            Some(selection_set) => selection_set.clone(),
            None => return 0,
        };

        self.visiting.push(name.to_string());
        let depth = self.selection_set(&selection_set);
        self.visiting.pop();

        self.cache.insert(name.to_string(), depth);
        depth
    }
}
