use crate::{
    auth::{AuthResponse, AuthenticatedUser, LoginRequest, RegisterRequest},
    error::AppError,
    models::UserResponse,
    response::ApiResponse,
    services::{AuthResult, UserService},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        AuthResponse {
            token: result.token,
            user: UserResponse::from(&result.user),
        }
    }
}

/// Register a new user
///
/// Creates a new account and returns a token together with the user.
/// An email that is already taken is a `400`.
#[post("/register")]
pub async fn register(
    service: web::Data<UserService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let result = service
        .register(&register_data.email, &register_data.password)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "User registered successfully",
        AuthResponse::from(result),
    )))
}

/// Login user
///
/// Unknown email and wrong password produce the same `401`.
#[post("/login")]
pub async fn login(
    service: web::Data<UserService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let result = service
        .login(&login_data.email, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Login successful",
        AuthResponse::from(result),
    )))
}

/// The caller's own account. Mounted behind [`AuthMiddleware`](crate::auth::AuthMiddleware).
pub async fn profile(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let account = service.get_profile(user.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Profile retrieved successfully",
        UserResponse::from(&account),
    )))
}
