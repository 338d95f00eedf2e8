//! SQL statements for the `persons` table.
//!
//! Create/get/list/delete are static. The partial update is assembled at call
//! time from whichever fields the caller supplied.
//!
//! ## Positional correspondence
//!
//! The update's `SET` clauses and its argument list are produced in a single
//! pass over a fixed-order `(column, value)` list, so the k-th clause always
//! names placeholder `$k` and the k-th argument is the value for it. The id is
//! appended last and bound by the `WHERE` clause.

use std::fmt::Write as _;

use persons_core::PersonPatch;

/// Columns every statement returns, in decode order.
pub const RETURNING_COLUMNS: &str = "id, name, age, address, work";

pub const CREATE_SQL: &str = "INSERT INTO persons (name, age, address, work) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, name, age, address, work";

pub const GET_SQL: &str = "SELECT id, name, age, address, work FROM persons WHERE id = $1";

pub const DELETE_SQL: &str = "DELETE FROM persons WHERE id = $1";

const LIST_SQL: &str = "SELECT id, name, age, address, work FROM persons ORDER BY id OFFSET $1";

/// List statement for the given limit. `$1` is the offset; `$2` (the limit)
/// is only present when `limit != 0`.
pub fn list_sql(limit: u64) -> String {
    if limit == 0 {
        LIST_SQL.to_string()
    } else {
        format!("{LIST_SQL} LIMIT $2")
    }
}

/// A value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Int(i32),
    BigInt(i64),
}

/// A built `UPDATE ... RETURNING` statement with its arguments in bind order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    sql: String,
    args: Vec<SqlArg>,
}

impl UpdateStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments in placeholder order: `args()[k - 1]` binds `$k`.
    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }

    /// Number of `SET` assignments (every argument except the trailing id).
    pub fn assignments(&self) -> usize {
        self.args.len() - 1
    }
}

/// Build the partial update for `patch`.
///
/// Returns `None` when the patch carries no field; nothing should be executed
/// in that case.
pub fn build_update(patch: &PersonPatch) -> Option<UpdateStatement> {
    let fields: [(&str, Option<SqlArg>); 4] = [
        ("name", patch.name.clone().map(SqlArg::Text)),
        ("age", patch.age.map(SqlArg::Int)),
        ("address", patch.address.clone().map(SqlArg::Text)),
        ("work", patch.work.clone().map(SqlArg::Text)),
    ];

    let mut set = String::new();
    let mut args = Vec::with_capacity(fields.len() + 1);
    for (column, value) in fields {
        let Some(value) = value else { continue };
        if !args.is_empty() {
            set.push_str(", ");
        }
        args.push(value);
        // Writing into a String cannot fail.
        let _ = write!(set, "{column} = ${}", args.len());
    }

    if args.is_empty() {
        return None;
    }

    args.push(SqlArg::BigInt(patch.id));
    let sql = format!(
        "UPDATE persons SET {set} WHERE id = ${} RETURNING {RETURNING_COLUMNS}",
        args.len()
    );
    Some(UpdateStatement { sql, args })
}
