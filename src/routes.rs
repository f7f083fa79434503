use log::{debug, error};
use sqlx::sqlite::SqlitePool;
use warp::http::StatusCode;
use warp::Filter;

use crate::dataset;
use crate::domain::{ErrorBody, IsoDate};
use crate::error::QueryFailed;
use crate::trip::{tobs_window_start, StartDatePolicy, TripWindow};

const WELCOME: &str = "Available Routes for Hawaii Weather Data:<br/><br>\
- Precipitation: <a href=\"/api/v1.0/precipitation\">/api/v1.0/precipitation<a><br/>\
- Stations: <a href=\"/api/v1.0/stations\">/api/v1.0/stations<a><br/>\
- TOBS: <a href=\"/api/v1.0/tobs\">/api/v1.0/tobs<a><br/>\
- Temp format for all Date Range(s): /api/v1.0/trip/yyyy-mm-dd/yyyy-mm-dd<br>\
NOTE: End date does data analysis through 08/23/17<br>";

fn query_failed(error: sqlx::Error) -> warp::Rejection {
    error!("Query failed: {}", error);
    warp::reject::custom(QueryFailed(error))
}

async fn serve_precipitation(pool: SqlitePool) -> Result<impl warp::Reply, warp::Rejection> {
    let mut conn = pool.acquire().await.map_err(query_failed)?;
    let rows = dataset::precipitation(&mut conn).await.map_err(query_failed)?;

    Ok(warp::reply::json(&rows))
}

async fn serve_stations(pool: SqlitePool) -> Result<impl warp::Reply, warp::Rejection> {
    let mut conn = pool.acquire().await.map_err(query_failed)?;
    let rows = dataset::stations(&mut conn).await.map_err(query_failed)?;

    Ok(warp::reply::json(&rows))
}

async fn serve_tobs(pool: SqlitePool) -> Result<impl warp::Reply, warp::Rejection> {
    let mut conn = pool.acquire().await.map_err(query_failed)?;

    // Only logged, the window below is anchored on the fixed dataset end.
    let latest = dataset::latest_date(&mut conn).await.map_err(query_failed)?;
    debug!("Latest measurement date: {:?}", latest);

    let after = tobs_window_start();
    let rows = match dataset::most_active_station(&mut conn).await.map_err(query_failed)? {
        Some(station) => {
            debug!("Most active station: {}", station);
            dataset::observations_after(&mut conn, &station, &after)
                .await
                .map_err(query_failed)?
        }
        None => Vec::new(),
    };

    Ok(warp::reply::json(&rows))
}

async fn serve_trip(
    pool: SqlitePool,
    window: TripWindow,
    not_found: String,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut conn = pool.acquire().await.map_err(query_failed)?;
    let stats = dataset::trip_stats(&mut conn, &window).await.map_err(query_failed)?;

    if stats.min.is_some() {
        Ok(warp::reply::with_status(warp::reply::json(&[stats]), StatusCode::OK))
    } else {
        let body = ErrorBody { error: not_found };
        Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::NOT_FOUND))
    }
}

async fn serve_trip_from(
    start_date: String,
    pool: SqlitePool,
    policy: StartDatePolicy,
) -> Result<impl warp::Reply, warp::Rejection> {
    let window = TripWindow::from_start(IsoDate::from(start_date), policy);
    let not_found = format!(
        "Date {} not found! Date not formatted correctly @ YYYY-MM-DD.",
        window.start
    );

    serve_trip(pool, window, not_found).await
}

async fn serve_trip_between(
    start_date: String,
    end_date: String,
    pool: SqlitePool,
    policy: StartDatePolicy,
) -> Result<impl warp::Reply, warp::Rejection> {
    let window = TripWindow::between(IsoDate::from(start_date), IsoDate::from(end_date), policy);
    let not_found =
        "Date(s) not found! Invalid date range/Date(s) not formatted correctly @ YYYY-MM-DD.".to_owned();

    serve_trip(pool, window, not_found).await
}

fn with_pool(pool: SqlitePool) -> impl Filter<Extract = (SqlitePool,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || pool.clone())
}

fn with_policy(
    policy: StartDatePolicy,
) -> impl Filter<Extract = (StartDatePolicy,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || policy)
}

pub fn routes(
    pool: SqlitePool,
    policy: StartDatePolicy,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let index_route = warp::path::end().map(|| warp::reply::html(WELCOME));
    let precipitation_route = warp::path!("api" / "v1.0" / "precipitation")
        .and(with_pool(pool.clone()))
        .and_then(serve_precipitation);
    let stations_route = warp::path!("api" / "v1.0" / "stations")
        .and(with_pool(pool.clone()))
        .and_then(serve_stations);
    let tobs_route = warp::path!("api" / "v1.0" / "tobs")
        .and(with_pool(pool.clone()))
        .and_then(serve_tobs);
    let trip_from_route = warp::path!("api" / "v1.0" / "trip" / String)
        .and(with_pool(pool.clone()))
        .and(with_policy(policy))
        .and_then(serve_trip_from);
    let trip_between_route = warp::path!("api" / "v1.0" / "trip" / String / String)
        .and(with_pool(pool))
        .and(with_policy(policy))
        .and_then(serve_trip_between);

    warp::get()
        .and(
            index_route
                .or(precipitation_route)
                .or(stations_route)
                .or(tobs_route)
                .or(trip_from_route)
                .or(trip_between_route),
        )
        .with(warp::log("weather_api"))
}
