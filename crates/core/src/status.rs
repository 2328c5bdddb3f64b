//! Human-readable meaning of the status codes the build REST API uses.

/// Describe an HTTP status code returned by the build server.
pub fn describe_status(code: u16) -> Option<&'static str> {
    let text = match code {
        200 => "Success, and there is a response body.",
        201 => {
            "Success, when creating resources. Some APIs return 200 when successfully \
             creating a resource."
        }
        204 => "Success, and there is no response body.",
        400 => "The parameters in the URL or in the request body aren't valid.",
        401 => "The request was not authenticated. Check the credentials and that the server accepts basic authentication.",
        403 => "The authenticated user doesn't have permission to perform the operation.",
        404 => {
            "The resource doesn't exist, or the authenticated user doesn't have permission \
             to see that it exists."
        }
        409 => {
            "There's a conflict between the request and the state of the data on the server."
        }
        _ => return None,
    };
    Some(text)
}
