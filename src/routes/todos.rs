use crate::{
    domain::DomainError,
    error::AppError,
    models::{CreateTodoRequest, TodoList, UpdateTodoRequest},
    response::ApiResponse,
    services::{NewTodo, TodoService},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Creates a new todo.
///
/// ## Request Body:
/// - `title`: 1 to 255 characters (required).
/// - `description` (optional): up to 1000 characters, defaults to empty.
///
/// ## Responses:
/// - `201 Created`: the stored todo, `completed` is always `false`.
/// - `400 Bad Request`: malformed JSON or failed validation.
/// - `500 Internal Server Error`: storage failure.
#[post("")]
pub async fn create_todo(
    service: web::Data<TodoService>,
    body: web::Json<CreateTodoRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let body = body.into_inner();
    let todo = service
        .create(NewTodo {
            title: body.title,
            description: body.description,
        })
        .await
        .map_err(todo_error)?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Todo created successfully", todo)))
}

/// Lists every todo, newest first, with the total count.
#[get("")]
pub async fn get_todos(service: web::Data<TodoService>) -> Result<impl Responder, AppError> {
    let todos = service.get_all().await.map_err(todo_error)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Todos retrieved successfully",
        TodoList::from(todos),
    )))
}

#[get("/{id}")]
pub async fn get_todo(
    service: web::Data<TodoService>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&id)?;
    let todo = service.get_by_id(id).await.map_err(todo_error)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Todo retrieved successfully", todo)))
}

/// Partially updates a todo.
///
/// Only the fields present in the body change; an empty body leaves the todo
/// as it was apart from `updated_at`.
#[put("/{id}")]
pub async fn update_todo(
    service: web::Data<TodoService>,
    id: web::Path<String>,
    body: web::Json<UpdateTodoRequest>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&id)?;
    body.validate()?;

    let todo = service
        .update(id, body.into_inner().into())
        .await
        .map_err(todo_error)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Todo updated successfully", todo)))
}

#[delete("/{id}")]
pub async fn delete_todo(
    service: web::Data<TodoService>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&id)?;
    service.delete(id).await.map_err(todo_error)?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Todo deleted successfully")))
}

/// Parses a path id. Ids are unsigned 32-bit integers that also fit the
/// storage's signed key column. Only plain ASCII digits are accepted; no sign.
fn parse_id(raw: &str) -> Result<i32, AppError> {
    Some(raw)
        .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse::<u32>().ok())
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid todo ID".into()))
}

fn todo_error(error: DomainError) -> AppError {
    match error {
        DomainError::NotFound => AppError::NotFound("Todo not found".into()),
        other => other.into(),
    }
}
