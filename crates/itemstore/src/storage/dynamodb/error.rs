//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `itemstore_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use itemstore_core::storage::RepositoryError;

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    if let Some(failure) = connection_failure("Scan", &err) {
        return failure;
    }

    let err = err.into_service_error();
    let exception_message = match &err {
        ScanError::ResourceNotFoundException(e) => e.message(),
        _ => None,
    };
    let message = service_message(&err, exception_message, "Scan failed");
    match err {
        ScanError::ResourceNotFoundException(_) => RepositoryError::TableNotFound(message),
        ScanError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            RepositoryError::OperationFailed("DynamoDB internal server error".to_string())
        }
        err => map_unmodeled(err.code(), message),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> RepositoryError {
    if let Some(failure) = connection_failure("PutItem", &err) {
        return failure;
    }

    let err = err.into_service_error();
    let exception_message = match &err {
        PutItemError::ConditionalCheckFailedException(e) => e.message(),
        PutItemError::ResourceNotFoundException(e) => e.message(),
        _ => None,
    };
    let message = service_message(&err, exception_message, "PutItem failed");
    match err {
        PutItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::ConditionFailed(message)
        }
        PutItemError::ResourceNotFoundException(_) => RepositoryError::TableNotFound(message),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::OperationFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::OperationFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::OperationFailed("DynamoDB internal server error".to_string())
        }
        err => map_unmodeled(err.code(), message),
    }
}

/// Errors raised before DynamoDB answered: no connection, or a timeout.
fn connection_failure<E, R>(operation: &str, err: &SdkError<E, R>) -> Option<RepositoryError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            Some(RepositoryError::ConnectionFailed(format!(
                "{operation} could not reach DynamoDB: {}",
                DisplayErrorContext(err)
            )))
        }
        _ => None,
    }
}

/// The message from the response metadata, then the one carried by the
/// modelled exception, then `fallback`.
fn service_message(
    err: &impl ProvideErrorMetadata,
    exception_message: Option<&str>,
    fallback: &str,
) -> String {
    let message = err
        .message()
        .filter(|m| !m.is_empty())
        .or(exception_message.filter(|m| !m.is_empty()));

    match message {
        Some(message) => message.to_string(),
        None => match err.code() {
            Some(code) => format!("{fallback}: {code}"),
            None => fallback.to_string(),
        },
    }
}

/// Classify errors DynamoDB reports without a modelled variant by their code.
pub fn map_unmodeled(code: Option<&str>, message: String) -> RepositoryError {
    match code {
        Some("ValidationException") | Some("SerializationException") => {
            RepositoryError::Validation(message)
        }
        Some("AccessDeniedException")
        | Some("UnrecognizedClientException")
        | Some("MissingAuthenticationTokenException")
        | Some("InvalidSignatureException") => RepositoryError::AccessDenied(message),
        Some("ThrottlingException") => RepositoryError::Throttled(message),
        _ => RepositoryError::OperationFailed(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::error::ErrorMetadata;

    #[test]
    fn test_validation_exception_maps_to_validation() {
        let error = map_unmodeled(
            Some("ValidationException"),
            "One or more parameter values were invalid".to_string(),
        );
        assert_eq!(
            error,
            RepositoryError::Validation("One or more parameter values were invalid".to_string())
        );
    }

    #[test]
    fn test_auth_codes_map_to_access_denied() {
        for code in ["AccessDeniedException", "UnrecognizedClientException"] {
            let error = map_unmodeled(Some(code), "not authorized".to_string());
            assert!(matches!(error, RepositoryError::AccessDenied(_)), "{code}");
        }
    }

    #[test]
    fn test_throttling_exception_maps_to_throttled() {
        let error = map_unmodeled(Some("ThrottlingException"), "Rate exceeded".to_string());
        assert_eq!(error, RepositoryError::Throttled("Rate exceeded".to_string()));
    }

    #[test]
    fn test_unknown_code_maps_to_operation_failed() {
        let error = map_unmodeled(None, "PutItem failed".to_string());
        assert_eq!(error, RepositoryError::OperationFailed("PutItem failed".to_string()));
    }

    #[test]
    fn test_scan_table_not_found_keeps_service_message() {
        let service_error = ScanError::ResourceNotFoundException(
            aws_sdk_dynamodb::types::error::ResourceNotFoundException::builder()
                .message("Requested resource not found")
                .build(),
        );
        let sdk_error: SdkError<ScanError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            map_scan_error(sdk_error),
            RepositoryError::TableNotFound("Requested resource not found".to_string())
        );
    }

    #[test]
    fn test_put_item_condition_failed_keeps_exception_message() {
        let service_error = PutItemError::ConditionalCheckFailedException(
            aws_sdk_dynamodb::types::error::ConditionalCheckFailedException::builder()
                .message("The conditional request failed")
                .build(),
        );
        let sdk_error: SdkError<PutItemError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            map_put_item_error(sdk_error),
            RepositoryError::ConditionFailed("The conditional request failed".to_string())
        );
    }

    #[test]
    fn test_metadata_message_preferred_over_exception_message() {
        let service_error = ScanError::ResourceNotFoundException(
            aws_sdk_dynamodb::types::error::ResourceNotFoundException::builder()
                .message("exception message")
                .meta(
                    ErrorMetadata::builder()
                        .message("Cannot do operations on a non-existent table")
                        .build(),
                )
                .build(),
        );
        let sdk_error: SdkError<ScanError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            map_scan_error(sdk_error),
            RepositoryError::TableNotFound(
                "Cannot do operations on a non-existent table".to_string()
            )
        );
    }

    #[test]
    fn test_missing_messages_fall_back_to_operation() {
        let service_error = ScanError::ResourceNotFoundException(
            aws_sdk_dynamodb::types::error::ResourceNotFoundException::builder().build(),
        );
        let sdk_error: SdkError<ScanError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            map_scan_error(sdk_error),
            RepositoryError::TableNotFound("Scan failed".to_string())
        );
    }

    #[test]
    fn test_put_item_throughput_exceeded_is_throttled() {
        let service_error = PutItemError::ProvisionedThroughputExceededException(
            aws_sdk_dynamodb::types::error::ProvisionedThroughputExceededException::builder()
                .build(),
        );
        let sdk_error: SdkError<PutItemError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            map_put_item_error(sdk_error),
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        );
    }
}
