//! SQLite implementation of [`ReportStore`].

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{
    CatalogEntry, Employee, Line, LineEmployeeAssignment, Site, StoredReport, SupportAssignment,
    SupportRole, SupportSlots, TaskRecord, ValidatedReport,
};

use super::{ReportSnapshot, ReportStore};

const SCHEMA: &str = include_str!("schema.sql");

const CHILD_TABLES: [&str; 3] = [
    "report_tasks",
    "report_line_employees",
    "report_support_roles",
];

/// A report store backed by one SQLite connection.
///
/// All access is serialized through the connection mutex. Norms and hours
/// are stored as decimal text so that they read back exactly.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub fn open(path: &str) -> ReportResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> ReportResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// Wraps an existing connection and ensures the schema exists.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ReportResult<Self> {
        let store = Self { conn };
        store.get_conn()?.execute_batch(SCHEMA)?;
        Ok(store)
    }

    fn get_conn(&self) -> ReportResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| ReportError::Storage {
            message: format!("connection lock poisoned: {}", e),
        })
    }
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text).map_err(|e| conversion_error(idx, e))
}

fn optional_decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| Decimal::from_str(&text).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn line_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Line> {
    let text: String = row.get(idx)?;
    text.parse().map_err(|e: ReportError| conversion_error(idx, e))
}

fn role_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<SupportRole> {
    let text: String = row.get(idx)?;
    text.parse().map_err(|e: ReportError| conversion_error(idx, e))
}

fn query_products(conn: &Connection) -> ReportResult<Vec<CatalogEntry>> {
    let mut stmt =
        conn.prepare("SELECT code, name, norm_a3, norm_a4 FROM products ORDER BY code")?;
    let products = stmt
        .query_map([], |row| {
            Ok(CatalogEntry {
                code: row.get(0)?,
                name: row.get(1)?,
                norm_a3: optional_decimal_column(row, 2)?,
                norm_a4: optional_decimal_column(row, 3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(products)
}

fn query_employees(conn: &Connection) -> ReportResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT id, name FROM employees ORDER BY name, id")?;
    let employees = stmt
        .query_map([], |row| {
            Ok(Employee {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(employees)
}

fn query_report_id(conn: &Connection, site_id: i64, date: NaiveDate) -> ReportResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM reports WHERE site_id = ?1 AND report_date = ?2",
            params![site_id, date],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn query_report(
    conn: &Connection,
    site_id: i64,
    date: NaiveDate,
) -> ReportResult<Option<StoredReport>> {
    let Some(report_id) = query_report_id(conn, site_id, date)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT line, product_code, qty_made, count_by_norm, discount_percent
         FROM report_tasks WHERE report_id = ?1 ORDER BY line, id",
    )?;
    let tasks = stmt
        .query_map(params![report_id], |row| {
            Ok(TaskRecord {
                line: line_column(row, 0)?,
                product_code: row.get(1)?,
                qty_made: row.get(2)?,
                count_by_norm: row.get(3)?,
                discount_percent: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT employee_id, name, work_time, line
         FROM report_line_employees WHERE report_id = ?1 ORDER BY id",
    )?;
    let line_employees = stmt
        .query_map(params![report_id], |row| {
            Ok(LineEmployeeAssignment {
                employee_id: row.get(0)?,
                name: row.get(1)?,
                work_time: decimal_column(row, 2)?,
                line: line_column(row, 3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT role, employee_id, name, work_time
         FROM report_support_roles WHERE report_id = ?1",
    )?;
    let filled = stmt
        .query_map(params![report_id], |row| {
            Ok(SupportAssignment {
                role: role_column(row, 0)?,
                employee_id: row.get(1)?,
                name: row.get(2)?,
                work_time: decimal_column(row, 3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut supports = SupportSlots::default();
    for assignment in filled {
        let role = assignment.role;
        *supports.get_mut(role) = assignment;
    }

    Ok(Some(StoredReport {
        id: report_id,
        site_id,
        report_date: date,
        content: ValidatedReport {
            tasks,
            line_employees,
            supports,
        },
    }))
}

impl ReportStore for SqliteStore {
    fn list_products(&self) -> ReportResult<Vec<CatalogEntry>> {
        let conn = self.get_conn()?;
        query_products(&conn)
    }

    fn list_employees(&self) -> ReportResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        query_employees(&conn)
    }

    fn list_sites(&self) -> ReportResult<Vec<Site>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM sites ORDER BY id")?;
        let sites = stmt
            .query_map([], |row| {
                Ok(Site {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sites)
    }

    fn find_report_id(&self, site_id: i64, date: NaiveDate) -> ReportResult<Option<i64>> {
        let conn = self.get_conn()?;
        query_report_id(&conn, site_id, date)
    }

    fn save_report(
        &self,
        site_id: i64,
        date: NaiveDate,
        report: &ValidatedReport,
    ) -> ReportResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO reports (site_id, report_date, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(site_id, report_date) DO UPDATE SET updated_at = excluded.updated_at",
            params![site_id, date, Utc::now().to_rfc3339()],
        )?;
        let report_id: i64 = tx.query_row(
            "SELECT id FROM reports WHERE site_id = ?1 AND report_date = ?2",
            params![site_id, date],
            |row| row.get(0),
        )?;

        for table in CHILD_TABLES {
            tx.execute(
                &format!("DELETE FROM {} WHERE report_id = ?1", table),
                params![report_id],
            )?;
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO report_tasks
                 (report_id, line, product_code, qty_made, count_by_norm, discount_percent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for task in &report.tasks {
                stmt.execute(params![
                    report_id,
                    task.line.as_str(),
                    task.product_code,
                    task.qty_made,
                    task.count_by_norm,
                    task.discount_percent,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO report_line_employees (report_id, employee_id, name, work_time, line)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for assignment in &report.line_employees {
                stmt.execute(params![
                    report_id,
                    assignment.employee_id,
                    assignment.name,
                    assignment.work_time.to_string(),
                    assignment.line.as_str(),
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO report_support_roles (report_id, role, employee_id, name, work_time)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for slot in report.supports.iter().filter(|s| s.is_filled()) {
                stmt.execute(params![
                    report_id,
                    slot.role.as_str(),
                    slot.employee_id,
                    slot.name,
                    slot.work_time.to_string(),
                ])?;
            }
        }

        tx.commit()?;
        debug!(
            report_id,
            site_id,
            date = %date,
            tasks = report.tasks.len(),
            line_employees = report.line_employees.len(),
            "Report children replaced"
        );
        Ok(report_id)
    }

    fn read_report(&self, site_id: i64, date: NaiveDate) -> ReportResult<Option<StoredReport>> {
        let conn = self.get_conn()?;
        query_report(&conn, site_id, date)
    }

    fn delete_report(&self, site_id: i64, date: NaiveDate) -> ReportResult<bool> {
        let conn = self.get_conn()?;
        let deleted = conn.execute(
            "DELETE FROM reports WHERE site_id = ?1 AND report_date = ?2",
            params![site_id, date],
        )?;
        Ok(deleted > 0)
    }

    fn upsert_products(&self, products: &[CatalogEntry]) -> ReportResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO products (code, name, norm_a3, norm_a4) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(code) DO UPDATE SET
                     name = excluded.name,
                     norm_a3 = excluded.norm_a3,
                     norm_a4 = excluded.norm_a4",
            )?;
            for product in products {
                if product.norm_a3.is_none() && product.norm_a4.is_none() {
                    debug!(code = %product.code, "Skipping product without norms");
                    continue;
                }
                stmt.execute(params![
                    product.code,
                    product.name,
                    product.norm_a3.map(|n| n.to_string()),
                    product.norm_a4.map(|n| n.to_string()),
                ])?;
                written += 1;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    fn upsert_employees(&self, employees: &[Employee]) -> ReportResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO employees (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            )?;
            for employee in employees {
                stmt.execute(params![employee.id, employee.name])?;
            }
        }
        tx.commit()?;
        Ok(employees.len())
    }

    fn upsert_sites(&self, sites: &[Site]) -> ReportResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sites (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            )?;
            for site in sites {
                stmt.execute(params![site.id, site.name])?;
            }
        }
        tx.commit()?;
        Ok(sites.len())
    }

    fn read_report_snapshot(
        &self,
        site_id: i64,
        date: NaiveDate,
    ) -> ReportResult<Option<ReportSnapshot>> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let Some(report) = query_report(&tx, site_id, date)? else {
            return Ok(None);
        };
        let snapshot = ReportSnapshot {
            report,
            products: query_products(&tx)?,
            employees: query_employees(&tx)?,
        };
        tx.commit()?;
        Ok(Some(snapshot))
    }
}
