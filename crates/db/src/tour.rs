//! The scripted operation tour: a fixed, ordered sequence of SQL operations
//! executed over a single connection, producing a [`Trace`].
//!
//! The sequence walks the full surface of a relational driver: idempotent
//! DDL, row-by-row inserts, a battery of read queries, an update and a
//! delete, transactional commit and rollback, aggregate commands, and drops.
//! Order is part of the contract. Any failure aborts the remainder, becomes
//! the trace's terminal error entry, and the connection is closed on both
//! the success path and every error path.
//!
//! There is no multi-row insert path; the seed rows go in one statement at
//! a time. This mirrors the documented behavior of the sample, it is not a
//! defect to fix here.

use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, Connection};

use galaxy_core::{ConnectionString, Trace};

use crate::error::RunError;
use crate::rows;

/// A sample city row. Mirrors the `cities` table columns.
#[derive(Debug, Clone, Copy)]
struct City {
    name: &'static str,
    population: i64,
    longitude: f64,
    latitude: f64,
    code: i64,
}

impl City {
    fn describe(&self) -> String {
        format!(
            "city: {} population: {} longitude: {} latitude: {} code: {}",
            self.name, self.population, self.longitude, self.latitude, self.code
        )
    }
}

/// A sample country row for the join table.
#[derive(Debug, Clone, Copy)]
struct Country {
    code: i64,
    name: &'static str,
}

const KANSAS_CITY: City = City {
    name: "Kansas City",
    population: 467_007,
    longitude: 39.0997,
    latitude: 94.5783,
    code: 1,
};

const SYDNEY: City = City {
    name: "Sydney",
    population: 4_293_000,
    longitude: -33.8651,
    latitude: -151.2094,
    code: 61,
};

/// Cities inserted one statement at a time after the first single insert.
const MORE_CITIES: [City; 6] = [
    City {
        name: "Seattle",
        population: 652_405,
        longitude: 47.6097,
        latitude: 122.3331,
        code: 1,
    },
    City {
        name: "New York",
        population: 8_406_000,
        longitude: 40.7127,
        latitude: 74.0059,
        code: 1,
    },
    City {
        name: "London",
        population: 8_308_000,
        longitude: 51.5072,
        latitude: 0.1275,
        code: 44,
    },
    City {
        name: "Tokyo",
        population: 13_350_000,
        longitude: 35.6833,
        latitude: -139.6833,
        code: 81,
    },
    City {
        name: "Madrid",
        population: 3_165_000,
        longitude: 40.4001,
        latitude: 3.7167,
        code: 34,
    },
    City {
        name: "Melbourne",
        population: 4_087_000,
        longitude: -37.8136,
        latitude: -144.9631,
        code: 61,
    },
];

/// Lookup rows for the join table.
const COUNTRIES: [Country; 5] = [
    Country {
        code: 1,
        name: "United States of America",
    },
    Country {
        code: 44,
        name: "United Kingdom",
    },
    Country {
        code: 81,
        name: "Japan",
    },
    Country {
        code: 34,
        name: "Spain",
    },
    Country {
        code: 61,
        name: "Australia",
    },
];

/// A bind parameter for a tour statement.
#[derive(Debug, Clone, Copy)]
enum Param {
    Int(i64),
    Float(f64),
    Text(&'static str),
}

/// Build a query with all parameters bound, in order.
fn bind_all<'q>(sql: &'q str, params: &[Param]) -> Query<'q, Any, AnyArguments<'q>> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match *param {
            Param::Int(value) => query.bind(value),
            Param::Float(value) => query.bind(value),
            Param::Text(value) => query.bind(value),
        };
    }
    query
}

/// Execute the full scripted sequence against the endpoint.
///
/// Never returns an error: every failure is converted into the trace's
/// terminal error entry and the partial trace is returned. The connection
/// is a scoped resource -- opened once here, closed exactly once on both
/// the success and the error path.
pub async fn run(url: &ConnectionString) -> Trace {
    let mut trace = Trace::new();

    let mut conn = match crate::connect(url).await {
        Ok(conn) => conn,
        Err(err) => {
            let err = RunError::Connect(err);
            tracing::error!(error = %err, endpoint = %url, "Tour aborted before any statement ran");
            trace.error(err.to_string());
            return trace;
        }
    };
    trace.note(format!("Connected to {url}"));
    tracing::debug!(endpoint = %url, "Connection opened");

    let outcome = script(&mut conn, &mut trace).await;

    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "Failed to close database connection");
    }

    match outcome {
        Ok(()) => trace.note("Complete!"),
        Err(err) => {
            tracing::error!(error = %err, "Tour aborted mid-sequence");
            trace.error(err.to_string());
        }
    }

    trace
}

/// The ordered statement sequence. Short-circuits on the first failure;
/// the caller owns connection cleanup.
async fn script(conn: &mut AnyConnection, trace: &mut Trace) -> Result<(), RunError> {
    // 1 Create tables. `if not exists` keeps re-runs against a database
    // that already holds them from failing.
    trace.note("1 Create tables");
    exec(
        conn,
        trace,
        "Create a table named: cities",
        "create table if not exists cities (City VARCHAR(255), Population INTEGER, \
         Longitude DECIMAL(8,4), Latitude DECIMAL(8,4), Code INTEGER)",
        &[],
    )
    .await?;
    exec(
        conn,
        trace,
        "Create a table named: country",
        "create table if not exists country (countryCode INTEGER, countryName VARCHAR(255))",
        &[],
    )
    .await?;

    // 2 Inserts
    trace.note("2 Inserts");
    trace.note("2.1 Insert a single row");
    insert_city(conn, trace, &KANSAS_CITY).await?;

    trace.note("2.2 Insert multiple rows: no multi-row statement support, inserting one at a time");
    for city in &MORE_CITIES {
        insert_city(conn, trace, city).await?;
    }
    for country in &COUNTRIES {
        exec(
            conn,
            trace,
            format!("Insert lookup row -> {}: {}", country.code, country.name),
            "insert into country values (?, ?)",
            &[Param::Int(country.code), Param::Text(country.name)],
        )
        .await?;
    }

    // 3 Queries
    trace.note("3 Queries");
    fetch(
        conn,
        trace,
        "3.1 First row with: Population > 8000000 and Code = 1",
        "select * from cities where Population > ? and Code = ? limit 1",
        &[Param::Int(8_000_000), Param::Int(1)],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.2 All rows with: Population > 8000000 and Longitude > 40",
        "select * from cities where Population > ? and Longitude > ?",
        &[Param::Int(8_000_000), Param::Float(40.0)],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.3 All rows in table: cities",
        "select * from cities",
        &[],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.4 Count rows with: Longitude < 40",
        "select count(*) from cities where Longitude < ?",
        &[Param::Float(40.0)],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.5 Rows ordered by: Population",
        "select * from cities order by Population",
        &[],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.6 Join tables: cities and country",
        "select n.City, n.Population, n.Longitude, n.Latitude, n.Code, j.countryName \
         from cities n inner join country j on n.Code = j.countryCode",
        &[],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.7 Distinct Code with: Longitude > 40",
        "select distinct Code from cities where Longitude > ?",
        &[Param::Float(40.0)],
    )
    .await?;
    fetch(
        conn,
        trace,
        "3.8 Distinct City, Code with: Population > 8000000",
        "select distinct City, Code from cities where Population > ?",
        &[Param::Int(8_000_000)],
    )
    .await?;

    // 4 Update
    trace.note("4 Update rows");
    exec(
        conn,
        trace,
        "Update row: Seattle now has code 999",
        "update cities set Code = ? where City = ?",
        &[Param::Int(999), Param::Text("Seattle")],
    )
    .await?;

    // 5 Delete
    trace.note("5 Delete rows");
    exec(
        conn,
        trace,
        "Delete rows: City like Tokyo",
        "delete from cities where City like ?",
        &[Param::Text("Tokyo")],
    )
    .await?;

    // 6 Transactions. First block commits an insert and an update; both
    // must stay visible. Second block deletes and rolls back; the delete
    // must not stay visible. The aggregate commands below observe both.
    trace.note("6 Transactions");
    trace.note("Start transaction");
    let mut tx = conn
        .begin()
        .await
        .map_err(|source| RunError::statement("begin transaction", source))?;
    insert_city(&mut tx, trace, &SYDNEY).await?;
    exec(
        &mut tx,
        trace,
        "Update row: Seattle now has code 998",
        "update cities set Code = ? where City = ?",
        &[Param::Int(998), Param::Text("Seattle")],
    )
    .await?;
    tx.commit()
        .await
        .map_err(|source| RunError::statement("commit", source))?;
    trace.note("Commit");

    trace.note("Start transaction");
    let mut tx = conn
        .begin()
        .await
        .map_err(|source| RunError::statement("begin transaction", source))?;
    exec(
        &mut tx,
        trace,
        "Delete rows: City like Sydney",
        "delete from cities where City like ?",
        &[Param::Text("Sydney")],
    )
    .await?;
    tx.rollback()
        .await
        .map_err(|source| RunError::statement("rollback", source))?;
    trace.note("Rollback");

    // 7 Commands
    trace.note("7 Commands");
    fetch(
        conn,
        trace,
        "7.1 Count rows in table: cities",
        "select count(*) from cities",
        &[],
    )
    .await?;
    fetch(
        conn,
        trace,
        "7.2 Distinct Code in table: cities",
        "select distinct Code from cities",
        &[],
    )
    .await?;

    // 8 Drop tables
    trace.note("8 Drop tables");
    exec(conn, trace, "Drop table: cities", "drop table cities", &[]).await?;
    exec(conn, trace, "Drop table: country", "drop table country", &[]).await?;

    Ok(())
}

/// Insert one city row. Values go through bind parameters; the recorded SQL
/// keeps the placeholders and the label carries the values.
async fn insert_city(
    conn: &mut AnyConnection,
    trace: &mut Trace,
    city: &City,
) -> Result<(), RunError> {
    exec(
        conn,
        trace,
        format!("Insert row -> {}", city.describe()),
        "insert into cities values (?, ?, ?, ?, ?)",
        &[
            Param::Text(city.name),
            Param::Int(city.population),
            Param::Float(city.longitude),
            Param::Float(city.latitude),
            Param::Int(city.code),
        ],
    )
    .await
}

/// Execute a statement that returns no rows and record it as a step.
async fn exec(
    conn: &mut AnyConnection,
    trace: &mut Trace,
    label: impl Into<String>,
    sql: &str,
    params: &[Param],
) -> Result<(), RunError> {
    bind_all(sql, params)
        .execute(&mut *conn)
        .await
        .map_err(|source| RunError::statement(sql, source))?;
    trace.step(label, sql);
    Ok(())
}

/// Execute a read query and record it as a step with its serialized rows.
async fn fetch(
    conn: &mut AnyConnection,
    trace: &mut Trace,
    label: impl Into<String>,
    sql: &str,
    params: &[Param],
) -> Result<(), RunError> {
    let fetched: Vec<AnyRow> = bind_all(sql, params)
        .fetch_all(&mut *conn)
        .await
        .map_err(|source| RunError::statement(sql, source))?;
    trace.step_with_rows(label, sql, rows::rows_to_json(&fetched));
    Ok(())
}
