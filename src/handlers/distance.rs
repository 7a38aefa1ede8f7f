use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::debug;
use crate::models::coordinate::parse_coordinate;
use crate::models::distance::DistanceResponse;
use crate::models::error::{ApiError, CoordinateParam};
use crate::models::position::Position;

pub async fn distance_handler(
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let [lat1, lon1, lat2, lon2] = parse_coordinates(&params)?;
    let from = Position::new(lat1, lon1);
    let to = Position::new(lat2, lon2);

    let response = DistanceResponse::from_meters(from.distance_to(&to));
    debug!("Distance from {:?} to {:?}: {} m", from, to, response.meter);

    let body = serde_json::to_vec(&response)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Parses lat1, lon1, lat2, lon2 in that order, failing on the first invalid one.
pub fn parse_coordinates(params: &[(String, String)]) -> Result<[f64; 4], ApiError> {
    let mut values = [0.0; 4];
    for (value, param) in values.iter_mut().zip(CoordinateParam::ALL) {
        *value = parse_param(params, param)?;
    }
    Ok(values)
}

fn parse_param(params: &[(String, String)], param: CoordinateParam) -> Result<f64, ApiError> {
    let raw = params.iter()
        .find(|(key, _)| key == param.key())
        .map(|(_, value)| value.as_str())
        .unwrap_or("");

    parse_coordinate(raw).ok_or_else(|| {
        debug!("Rejected {}={:?}", param.key(), raw);
        ApiError::InvalidParameter(param)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn pairs(query: &[(&str, &str)]) -> Vec<(String, String)> {
        query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
        let response = crate::app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response.headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn parses_all_four_in_order() {
        let params = pairs(&[("lon2", "4"), ("lat1", "1"), ("lat2", "-3.5"), ("lon1", "2e1")]);
        assert_eq!(parse_coordinates(&params).unwrap(), [1.0, 20.0, -3.5, 4.0]);
    }

    #[test]
    fn first_invalid_parameter_wins() {
        let params = pairs(&[("lat1", "1"), ("lon1", "x"), ("lat2", "y"), ("lon2", "z")]);
        match parse_coordinates(&params) {
            Err(ApiError::InvalidParameter(param)) => assert_eq!(param, CoordinateParam::Lon1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn first_value_of_repeated_key_is_used() {
        let params = pairs(&[("lat1", "1"), ("lat1", "bad"), ("lon1", "2"), ("lat2", "3"), ("lon2", "4")]);
        assert_eq!(parse_coordinates(&params).unwrap(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn overflowing_values_are_rejected() {
        for bad in ["1e400", "-1e400"] {
            let params = pairs(&[("lat1", "0"), ("lon1", "0"), ("lat2", bad), ("lon2", "0")]);
            assert!(matches!(
                parse_coordinates(&params),
                Err(ApiError::InvalidParameter(CoordinateParam::Lat2))
            ));
        }
    }

    #[tokio::test]
    async fn non_finite_literals_fail_serialization() {
        for value in ["inf", "NaN", "-Infinity"] {
            let (status, content_type, body) =
                get(&format!("/distance?lat1={}&lon1=0&lat2=0&lon2=1", value)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", value);
            assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
            assert_eq!(body, "Failed to marshal JSON response");
        }
    }

    #[tokio::test]
    async fn overflow_is_bad_request() {
        let (status, _, body) = get("/distance?lat1=1e400&lon1=0&lat2=0&lon2=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid latitude for point 1");
    }

    #[tokio::test]
    async fn hex_float_is_accepted() {
        let (status, _, body) = get("/distance?lat1=0x1p0&lon1=0&lat2=0&lon2=0").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["km"], "111.19");
    }

    #[tokio::test]
    async fn returns_distance_as_json() {
        let (status, content_type, body) = get("/distance?lat1=0&lon1=0&lat2=0&lon2=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let meter = json["meter"].as_f64().unwrap();
        assert!((meter - 111_194.93).abs() < 1.0);
        assert_eq!(json["km"], "111.19");
        assert_eq!(json["km"].as_str().unwrap(), format!("{:.2}", meter / 1000.0));
    }

    #[tokio::test]
    async fn same_point_is_zero() {
        let (status, _, body) = get("/distance?lat1=48.8566&lon1=2.3522&lat2=48.8566&lon2=2.3522").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["km"], "0.00");
    }

    #[tokio::test]
    async fn invalid_lat1_is_bad_request() {
        let (status, content_type, body) = get("/distance?lat1=abc&lon1=0&lat2=0&lon2=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(body, "Invalid latitude for point 1");
    }

    #[tokio::test]
    async fn each_parameter_has_its_own_message() {
        let cases = [
            ("/distance?lat1=0&lon1=a&lat2=0&lon2=1", "Invalid longitude for point 1"),
            ("/distance?lat1=0&lon1=0&lat2=a&lon2=1", "Invalid latitude for point 2"),
            ("/distance?lat1=0&lon1=0&lat2=0&lon2=a", "Invalid longitude for point 2"),
        ];
        for (uri, message) in cases {
            let (status, _, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, message);
        }
    }

    #[tokio::test]
    async fn missing_parameters_report_the_first_one() {
        let (status, _, body) = get("/distance").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid latitude for point 1");

        let (status, _, body) = get("/distance?lat1=1&lon1=2&lon2=4").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid latitude for point 2");
    }

    #[tokio::test]
    async fn empty_value_is_invalid() {
        let (status, _, body) = get("/distance?lat1=&lon1=0&lat2=0&lon2=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid latitude for point 1");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (status, _, _) = get("/distances?lat1=0&lon1=0&lat2=0&lon2=0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
