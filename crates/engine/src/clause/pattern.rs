use ir::{StmtNum, StmtType};
use pkb::ReadFacade;
use pql::{DesignEntity, ExprSpec, Pattern, Ref};

use crate::table::{Entity, OutputTable};
use crate::EngineError;

pub(crate) fn evaluate(read: &ReadFacade<'_>, pattern: &Pattern) -> Result<OutputTable, EngineError> {
    let unsupported = |argument: String| EngineError::UnsupportedArgument {
        relation: "pattern".to_string(),
        argument,
    };
    let (candidates, vars): (Vec<StmtNum>, _) = match pattern.synonym.entity {
        DesignEntity::Assign => {
            let candidates: Vec<StmtNum> = match &pattern.expr {
                ExprSpec::Wildcard => read.statements_of_type(StmtType::Assign).collect(),
                ExprSpec::Exact(postfix) => read.assignments_matching(postfix, false),
                ExprSpec::Partial(postfix) => read.assignments_matching(postfix, true),
            };
            (candidates, read.assignment_lhs())
        }
        DesignEntity::While | DesignEntity::If if pattern.expr != ExprSpec::Wildcard => {
            return Err(unsupported(format!("{:?}", pattern.expr)));
        }
        DesignEntity::While => {
            let view = read.while_control_vars();
            (view.keys().copied().collect(), view)
        }
        DesignEntity::If => {
            let view = read.if_control_vars();
            (view.keys().copied().collect(), view)
        }
        other => return Err(unsupported(other.keyword().to_string())),
    };

    let synonym = pattern.synonym.clone();
    Ok(match &pattern.var {
        Ref::Wildcard => OutputTable::column(synonym, candidates.into_iter().map(Entity::Stmt)),
        Ref::Ident(name) => OutputTable::column(
            synonym,
            candidates
                .into_iter()
                .filter(|s| vars.has(s, name.as_str()))
                .map(Entity::Stmt),
        ),
        Ref::Synonym(v) => {
            let rows = candidates.into_iter().flat_map(|s| {
                vars.get_forward(&s)
                    .iter()
                    .map(move |name| vec![Entity::Stmt(s), Entity::Name(name.clone())])
            });
            OutputTable::new(vec![synonym, v.clone()], rows)
        }
        Ref::Integer(n) => return Err(unsupported(n.to_string())),
    })
}
