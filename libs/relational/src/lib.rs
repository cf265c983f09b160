//! # relational
//!
//! An immutable SQL expression tree with dialect-aware printing, method-call translation
//! and update SQL generation.
//!
//! The [ast](ast/index.html) module holds the node types. Nodes are shared through
//! [`Expression`](ast::Expression) handles and are never mutated after construction; a
//! [visitor](visitor/index.html) rewrites a tree by substituting whole subtrees and reuses
//! every node whose children did not change.
//!
//! Rendering goes through the [printer](printer/index.html), which asks a
//! [`SqlGenerationHelper`](dialect::SqlGenerationHelper) for the dialect's lexical rules.
//!
//! ```rust
//! # use relational::{prelude::*, dialect::RelationalSqlGenerationHelper};
//! let factory = SqlExpressionFactory::default();
//! let helper = RelationalSqlGenerationHelper::default();
//!
//! let left = factory.select(factory.table("Customers", None, "c"))
//!     .project(factory.column("Name", "c", ValueType::String, true), None);
//! let right = factory.select(factory.table("Suppliers", None, "s"))
//!     .project(factory.column("Name", "s", ValueType::String, true), None);
//!
//! let except = factory.except("t", left, right, false);
//! let printed = ExpressionPrinter::print(&helper, &except);
//!
//! assert_eq!(
//!     "(\n    SELECT \"c\".\"Name\"\n    FROM \"Customers\" AS \"c\"\n    EXCEPT ALL\n    SELECT \"s\".\"Name\"\n    FROM \"Suppliers\" AS \"s\"\n) AS t",
//!     printed.sql
//! );
//! ```
pub mod ast;
pub mod cache;
pub mod dialect;
pub mod error;
pub mod factory;
pub mod printer;
pub mod translation;
pub mod update;
pub mod visitor;

pub mod prelude;

pub type Result<T> = std::result::Result<T, error::Error>;
