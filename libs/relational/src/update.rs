//! SQL generation for saving changes: one INSERT, UPDATE or DELETE per modified row,
//! followed by whatever the dialect needs to report generated values and affected rows.
mod batch;
mod column_modification;
mod command;
mod generator;

pub use batch::{CommandParameter, ModificationCommandBatch, RawSqlCommand};
pub use column_modification::{ColumnFlag, ColumnFlags, ColumnModification};
pub use command::{EntityState, ModificationCommand};
pub use generator::{ResultSetMapping, UpdateSqlGenerator};
