//! Synonym domains and attribute values.

use pkb::ReadFacade;
use pql::{AttrName, AttrRef, DesignEntity, Synonym};

use crate::table::{Entity, OutputTable};

/// Every value `synonym` can take in this program.
pub fn domain(read: &ReadFacade<'_>, synonym: &Synonym) -> Vec<Entity> {
    match synonym.entity {
        DesignEntity::Stmt => read.statements().map(Entity::Stmt).collect(),
        DesignEntity::Variable => read.variables().map(Entity::from).collect(),
        DesignEntity::Constant => read.constants().map(Entity::from).collect(),
        DesignEntity::Procedure => read.procedures().map(Entity::from).collect(),
        entity => match entity.stmt_type() {
            Some(t) => read.statements_of_type(t).map(Entity::Stmt).collect(),
            None => Vec::new(),
        },
    }
}

/// Domain of `synonym` as a single-column table.
pub fn domain_table(read: &ReadFacade<'_>, synonym: &Synonym) -> OutputTable {
    OutputTable::column(synonym.clone(), domain(read, synonym))
}

/// Whether `value` lies in the domain of `synonym`.
pub fn in_domain(read: &ReadFacade<'_>, synonym: &Synonym, value: &Entity) -> bool {
    match (synonym.entity, value) {
        (DesignEntity::Stmt, Entity::Stmt(n)) => read.is_statement(*n),
        (DesignEntity::Variable, Entity::Name(s)) => read.has_variable(s),
        (DesignEntity::Constant, Entity::Name(s)) => read.has_constant(s),
        (DesignEntity::Procedure, Entity::Name(s)) => read.has_procedure(s),
        (entity, Entity::Stmt(n)) => {
            entity.stmt_type().is_some() && read.statement_type(*n) == entity.stmt_type()
        }
        _ => false,
    }
}

/// Value of `attr` for one binding of its synonym.
///
/// `call.procName` and `read.varName`/`print.varName` look the value up in
/// the knowledge base; every other attribute is the bound value itself.
pub fn attr_value(read: &ReadFacade<'_>, attr: &AttrRef, value: &Entity) -> Option<String> {
    match (attr.synonym.entity, attr.attr, value) {
        (DesignEntity::Call, AttrName::ProcName, Entity::Stmt(n)) => {
            read.called_procedure(*n).map(str::to_string)
        }
        (DesignEntity::Read, AttrName::VarName, Entity::Stmt(n)) => {
            read.read_var(*n).map(str::to_string)
        }
        (DesignEntity::Print, AttrName::VarName, Entity::Stmt(n)) => {
            read.print_var(*n).map(str::to_string)
        }
        _ => Some(value.to_string()),
    }
}
