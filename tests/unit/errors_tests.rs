/*!
 * Tests for error types and conversions
 */

use wp_translate::errors::{AppError, ContentError, ProviderError, TranslationError};

#[test]
fn test_providerError_serviceUnavailable_shouldBeTransient() {
    let error = ProviderError::ServiceUnavailable("overloaded".to_string());
    assert!(error.is_transient());
    assert!(format!("{}", error).contains("Service unavailable"));
}

#[test]
fn test_providerError_otherKinds_shouldNotBeTransient() {
    let errors = vec![
        ProviderError::RequestFailed("timeout".to_string()),
        ProviderError::ParseError("bad json".to_string()),
        ProviderError::ApiError { status_code: 500, message: "boom".to_string() },
        ProviderError::ConnectionError("refused".to_string()),
        ProviderError::RateLimitExceeded("slow down".to_string()),
        ProviderError::AuthenticationError("bad key".to_string()),
    ];

    for error in errors {
        assert!(!error.is_transient(), "{:?} should not be transient", error);
    }
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 400,
        message: "Invalid model".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("400"));
    assert!(display.contains("Invalid model"));
}

#[test]
fn test_translationError_transient_shouldReportAttempts() {
    let error = TranslationError::Transient {
        attempts: 3,
        source: ProviderError::ServiceUnavailable("down".to_string()),
    };
    let display = format!("{}", error);
    assert!(display.contains("3 attempts"));
    assert!(error.provider_error().is_transient());
}

#[test]
fn test_translationError_fromProviderError_shouldWrapAsFatal() {
    let provider_error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let translation_error: TranslationError = provider_error.into();
    assert!(matches!(translation_error, TranslationError::Fatal(_)));
    assert!(format!("{}", translation_error).contains("Invalid API key"));
}

#[test]
fn test_contentError_retrieval_shouldDisplayStatusCode() {
    let error = ContentError::Retrieval { status_code: 404 };
    assert_eq!(format!("{}", error), "Error retrieving post. Status code: 404");
}

#[test]
fn test_contentError_publish_shouldKeepBody() {
    let error = ContentError::Publish {
        status_code: 500,
        body: "{\"code\":\"internal_error\"}".to_string(),
    };
    assert!(format!("{}", error).contains("500"));
    if let ContentError::Publish { body, .. } = error {
        assert!(body.contains("internal_error"));
    }
}

#[test]
fn test_appError_fromContentError_shouldWrapCorrectly() {
    let app_error: AppError = ContentError::Retrieval { status_code: 401 }.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Content API error"));
    assert!(display.contains("401"));
}

#[test]
fn test_appError_fromTranslationError_shouldWrapCorrectly() {
    let translation_error = TranslationError::Fatal(ProviderError::ParseError("x".to_string()));
    let app_error: AppError = translation_error.into();
    assert!(format!("{}", app_error).contains("Translation error"));
}

#[test]
fn test_appError_config_shouldDisplayCorrectly() {
    let error = AppError::Config("TRANSLATE_RETRY_COUNT is not a number".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("TRANSLATE_RETRY_COUNT"));
}

/// Provider failures only reach the application through a translation
#[test]
fn test_appError_withProviderFailure_shouldArriveAsTranslationError() {
    let translation_error: TranslationError = ProviderError::RateLimitExceeded("slow down".to_string()).into();
    let app_error: AppError = translation_error.into();

    let kind = match &app_error {
        AppError::Config(_) => "config",
        AppError::Content(_) => "content",
        AppError::Translation(_) => "translation",
    };
    assert_eq!(kind, "translation");
    assert!(format!("{}", app_error).starts_with("Translation error"));
}
