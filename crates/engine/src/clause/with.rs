use std::collections::HashMap;

use pkb::ReadFacade;
use pql::{AttrRef, With, WithRef};

use crate::domain::{attr_value, domain};
use crate::table::{Entity, OutputTable};

/// Bindings of the attribute's synonym paired with their attribute value.
fn valued(read: &ReadFacade<'_>, attr: &AttrRef) -> Vec<(Entity, String)> {
    domain(read, &attr.synonym)
        .into_iter()
        .filter_map(|e| attr_value(read, attr, &e).map(|v| (e, v)))
        .collect()
}

pub(crate) fn evaluate(read: &ReadFacade<'_>, with: &With) -> OutputTable {
    if with.lhs.attr_type() != with.rhs.attr_type() {
        return OutputTable::truth(false);
    }
    match (&with.lhs, &with.rhs) {
        (WithRef::Attr(a), WithRef::Attr(b)) if a.synonym == b.synonym => {
            let values = domain(read, &a.synonym).into_iter().filter(|e| {
                let lhs = attr_value(read, a, e);
                lhs.is_some() && lhs == attr_value(read, b, e)
            });
            OutputTable::column(a.synonym.clone(), values)
        }
        (WithRef::Attr(a), WithRef::Attr(b)) => {
            let mut by_value: HashMap<String, Vec<Entity>> = HashMap::new();
            for (e, v) in valued(read, b) {
                by_value.entry(v).or_default().push(e);
            }
            let rows = valued(read, a).into_iter().flat_map(|(l, v)| {
                by_value
                    .get(&v)
                    .into_iter()
                    .flatten()
                    .map(move |r| vec![l.clone(), r.clone()])
            });
            OutputTable::new(vec![a.synonym.clone(), b.synonym.clone()], rows.collect::<Vec<_>>())
        }
        (WithRef::Attr(a), literal) | (literal, WithRef::Attr(a)) => {
            let target = literal_value(literal);
            OutputTable::column(
                a.synonym.clone(),
                valued(read, a)
                    .into_iter()
                    .filter(|(_, v)| Some(v.as_str()) == target)
                    .map(|(e, _)| e),
            )
        }
        (l, r) => OutputTable::truth(literal_value(l) == literal_value(r)),
    }
}

fn literal_value(r: &WithRef) -> Option<&str> {
    match r {
        WithRef::Ident(s) | WithRef::Integer(s) => Some(s),
        WithRef::Attr(_) => None,
    }
}
