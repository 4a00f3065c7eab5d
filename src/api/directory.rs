//! City, university and language listings / 城市、大学、语言列表

use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use globaledu_backend::datasets::{
    cities, languages, universities, City, CityQuery, Language, LanguageQuery, University, UniversityQuery,
};

use super::{lenient_query, DirectoryResponse};

/// GET /api/cities?search&region
pub async fn list_cities(query: Result<Query<CityQuery>, QueryRejection>) -> Json<DirectoryResponse<&'static City>> {
    let query = lenient_query(query);
    let result = cities::search(&query);
    tracing::debug!("cities query {:?} -> {}/{}", query, result.count, result.total);
    Json(result.into())
}

/// GET /api/universities?search&city
pub async fn list_universities(
    query: Result<Query<UniversityQuery>, QueryRejection>,
) -> Json<DirectoryResponse<&'static University>> {
    let query = lenient_query(query);
    let result = universities::search(&query);
    tracing::debug!("universities query {:?} -> {}/{}", query, result.count, result.total);
    Json(result.into())
}

/// GET /api/languages?search
pub async fn list_languages(
    query: Result<Query<LanguageQuery>, QueryRejection>,
) -> Json<DirectoryResponse<&'static Language>> {
    Json(languages::search(&lenient_query(query)).into())
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get, state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_cities_envelope() {
        let (status, _, body) = get(build_router(state()), "/api/cities?search=nov&region=all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["total"], 20);
        assert_eq!(body["data"][0]["name"], "Nizhny Novgorod");
        assert_eq!(body["data"][1]["name"], "Novosibirsk");
    }

    #[tokio::test]
    async fn test_region_with_spaces() {
        let (_, _, body) = get(
            build_router(state()),
            "/api/cities?region=Far%20Eastern%20Federal%20District",
        )
        .await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["name"], "Vladivostok");
    }

    #[tokio::test]
    async fn test_unknown_parameters_are_ignored() {
        let (status, _, body) = get(build_router(state()), "/api/universities?city=&bogus=1&search=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 20);
    }

    #[tokio::test]
    async fn test_repeated_parameter_is_unconstrained() {
        let (status, _, body) = get(
            build_router(state()),
            "/api/cities?region=all&region=Volga%20Federal%20District",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 20);

        let (status, _, body) = get(build_router(state()), "/api/universities?search=a&search=b").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 20);
    }

    #[tokio::test]
    async fn test_languages() {
        let (_, _, body) = get(build_router(state()), "/api/languages?search=bengali").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["code"], "bn");
        assert_eq!(body["data"][0]["nativeName"], "বাংলা");
    }
}
