use std::path::Path;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};

use crate::domain::{IsoDate, Precipitation, Station, TemperatureObservation, TripStats};
use crate::error::DatasetError;
use crate::trip::TripWindow;

/// Tables and columns the service reads. Anything else in the dataset is ignored.
const SCHEMA: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station", "id"]),
];

/// Opens the dataset read-only and checks it carries the expected schema.
pub async fn open(path: &Path, max_connections: u32) -> Result<SqlitePool, DatasetError> {
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|error| DatasetError::Open(path.to_path_buf(), error))?;

    bind_schema(&pool).await?;
    info!("Opened dataset {}", path.display());

    Ok(pool)
}

pub async fn bind_schema(pool: &SqlitePool) -> Result<(), DatasetError> {
    for &(table, columns) in SCHEMA {
        let present: Vec<String> = sqlx::query_scalar("select name from pragma_table_info(?)")
            .bind(table)
            .fetch_all(pool)
            .await?;

        if present.is_empty() {
            return Err(DatasetError::MissingTable(table));
        }

        for &column in columns {
            if !present.iter().any(|name| name.eq_ignore_ascii_case(column)) {
                return Err(DatasetError::MissingColumn { table, column });
            }
        }
    }

    Ok(())
}

pub async fn precipitation(conn: &mut SqliteConnection) -> Result<Vec<Precipitation>, sqlx::Error> {
    sqlx::query_as("select prcp as precipitation, date from measurement")
        .fetch_all(conn)
        .await
}

pub async fn stations(conn: &mut SqliteConnection) -> Result<Vec<Station>, sqlx::Error> {
    sqlx::query_as("select station, id from station")
        .fetch_all(conn)
        .await
}

pub async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("select date from measurement order by date desc limit 1")
        .fetch_optional(conn)
        .await
}

/// Station with the most measurement rows. Ties resolve in whatever order
/// SQLite yields the groups.
pub async fn most_active_station(conn: &mut SqliteConnection) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "select station from measurement
         group by station
         order by count(station) desc
         limit 1",
    )
    .fetch_optional(conn)
    .await
}

pub async fn observations_after(
    conn: &mut SqliteConnection,
    station: &str,
    after: &IsoDate,
) -> Result<Vec<TemperatureObservation>, sqlx::Error> {
    sqlx::query_as(
        "select date, tobs, station from measurement
         where date > ? and station = ?",
    )
    .bind(after.as_str())
    .bind(station)
    .fetch_all(conn)
    .await
}

pub async fn trip_stats(conn: &mut SqliteConnection, window: &TripWindow) -> Result<TripStats, sqlx::Error> {
    sqlx::query_as(
        "select min(tobs) as min, avg(tobs) as average, max(tobs) as max from measurement
         where date >= ? and date <= ?",
    )
    .bind(window.start.as_str())
    .bind(window.end.as_str())
    .fetch_one(conn)
    .await
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_a_dataset_with_the_expected_schema() {
        let dir = fixture::create(fixture::STATIONS, fixture::MEASUREMENTS).await;
        let pool = open(&fixture::path(&dir), 2).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        assert_eq!(precipitation(&mut conn).await.unwrap().len(), fixture::MEASUREMENTS.len());
        assert_eq!(stations(&mut conn).await.unwrap().len(), fixture::STATIONS.len());
    }

    #[tokio::test]
    async fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();

        let result = open(&dir.path().join("absent.sqlite"), 1).await;

        assert!(matches!(result, Err(DatasetError::Open(_, _))));
    }

    #[tokio::test]
    async fn missing_table_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("partial.sqlite"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await.unwrap();
        sqlx::query("create table measurement (id integer, station text, date text, prcp float)")
            .execute(&pool)
            .await
            .unwrap();

        let result = bind_schema(&pool).await;

        assert!(matches!(
            result,
            Err(DatasetError::MissingColumn { table: "measurement", column: "tobs" })
        ));

        sqlx::query("alter table measurement add column tobs float")
            .execute(&pool)
            .await
            .unwrap();

        assert!(matches!(bind_schema(&pool).await, Err(DatasetError::MissingTable("station"))));
    }

    #[tokio::test]
    async fn most_active_station_has_the_most_rows() {
        let dir = fixture::create(fixture::STATIONS, fixture::MEASUREMENTS).await;
        let pool = open(&fixture::path(&dir), 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        assert_eq!(most_active_station(&mut conn).await.unwrap().as_deref(), Some("USC00519281"));
        assert_eq!(latest_date(&mut conn).await.unwrap().as_deref(), Some("2017-08-23"));
    }

    #[tokio::test]
    async fn empty_range_yields_null_stats() {
        let dir = fixture::create(fixture::STATIONS, fixture::MEASUREMENTS).await;
        let pool = open(&fixture::path(&dir), 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let window = TripWindow {
            start: IsoDate::from("2016-08-23"),
            end: IsoDate::from("1900-01-01"),
        };

        let stats = trip_stats(&mut conn, &window).await.unwrap();

        assert!(stats.min.is_none());
        assert!(stats.average.is_none());
        assert!(stats.max.is_none());
    }
}
