use crate::api::errors::{public_message, status_for};
use crate::auth::{Principal, PrincipalExtractor, UserPrincipal};
use crate::db::{UserOperations, VoteOperations};
use crate::enums::common::{
    DishVotesResponse, FeedbackRequest, SuccessResponse, UserVotesResponse, VoteRequest,
    VoteResponse,
};
use crate::traits::Validate;
use actix_web::{get, post, web, HttpResponse, Responder};
use std::collections::BTreeMap;

fn vote_error(status: actix_web::http::StatusCode, msg: String) -> HttpResponse {
    HttpResponse::build(status).json(VoteResponse {
        success: false,
        likes: 0,
        dislikes: 0,
        user_vote: None,
        error: Some(msg),
    })
}

#[utoipa::path(
    tag = "Votes",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote toggled; live tally returned", body = VoteResponse),
        (status = 400, description = "Dish is not open for voting", body = VoteResponse),
        (status = 404, description = "No such dish", body = VoteResponse)
    ),
    summary = "Like or dislike a dish"
)]
#[post("/vote")]
pub(crate) async fn cast_vote(
    user: UserPrincipal,
    vote_ops: web::Data<VoteOperations>,
    req_data: web::Json<VoteRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(vote_error(actix_web::http::StatusCode::BAD_REQUEST, msg));
    }
    let Some(dish) = req_data.normalized_id() else {
        return Ok(vote_error(
            actix_web::http::StatusCode::BAD_REQUEST,
            "dishId or dishName is required".to_string(),
        ));
    };

    let vote = req_data.vote;
    let uid = user.user_id();
    let dish_cl = dish.clone();
    let result = web::block(move || vote_ops.cast_vote(uid, &dish_cl, vote)).await?;

    match result {
        Ok((tally, user_vote)) => {
            debug!(
                "cast_vote: user {} on {} -> {:?} ({} / {})",
                uid, dish, user_vote, tally.likes, tally.dislikes
            );
            Ok(HttpResponse::Ok().json(VoteResponse {
                success: true,
                likes: tally.likes,
                dislikes: tally.dislikes,
                user_vote,
                error: None,
            }))
        }
        Err(e) => {
            error!("VOTES: cast_vote(): user {} on {}: {}", uid, dish, e);
            Ok(vote_error(status_for(&e), public_message(&e)))
        }
    }
}

#[utoipa::path(
    tag = "Votes",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Comment stored", body = SuccessResponse),
        (status = 400, description = "Empty or overlong comment", body = SuccessResponse),
        (status = 404, description = "No such dish", body = SuccessResponse)
    ),
    summary = "Leave a comment on a dish"
)]
#[post("/feedback")]
pub(crate) async fn submit_feedback(
    user: UserPrincipal,
    vote_ops: web::Data<VoteOperations>,
    user_ops: web::Data<UserOperations>,
    req_data: web::Json<FeedbackRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(HttpResponse::BadRequest().json(SuccessResponse {
            success: false,
            error: Some(msg),
        }));
    }

    let Some(dish) = req_data.normalized_id() else {
        return Ok(HttpResponse::BadRequest().json(SuccessResponse {
            success: false,
            error: Some("dishId or dishName is required".to_string()),
        }));
    };
    let FeedbackRequest { comment, .. } = req_data.into_inner();
    let uid = user.user_id();

    let result = web::block(move || {
        let author = user_ops.get_user(uid)?.name;
        vote_ops.add_feedback(uid, &author, &dish, &comment)
    })
    .await?;

    match result {
        Ok(saved) => {
            debug!(
                "submit_feedback: comment {} on {} by user {}",
                saved.comment_id, saved.dish_id, uid
            );
            Ok(HttpResponse::Ok().json(SuccessResponse {
                success: true,
                error: None,
            }))
        }
        Err(e) => {
            error!("VOTES: submit_feedback(): user {}: {}", uid, e);
            Ok(HttpResponse::build(status_for(&e)).json(SuccessResponse {
                success: false,
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Votes",
    responses(
        (status = 200, description = "Live tally and comments per dish", body = DishVotesResponse)
    ),
    summary = "Vote summary of every dish"
)]
#[get("/dish-votes")]
pub(crate) async fn dish_votes(vote_ops: web::Data<VoteOperations>) -> actix_web::Result<impl Responder> {
    let result = web::block(move || vote_ops.dish_vote_summaries()).await?;

    match result {
        Ok(votes) => Ok(HttpResponse::Ok().json(DishVotesResponse {
            status: "ok".to_string(),
            votes,
            error: None,
        })),
        Err(e) => {
            error!("VOTES: dish_votes(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(DishVotesResponse {
                status: "error".to_string(),
                votes: BTreeMap::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Votes",
    params(
        ("user_id", description = "User whose votes to fetch"),
    ),
    responses(
        (status = 200, description = "Latest vote per dish", body = UserVotesResponse),
        (status = 403, description = "Users may only read their own votes", body = UserVotesResponse)
    ),
    summary = "Votes cast by a user"
)]
#[get("/user-votes/{user_id}")]
pub(crate) async fn user_votes(
    principal: PrincipalExtractor,
    vote_ops: web::Data<VoteOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let target = path.into_inner().0;
    let allowed = match &principal.0 {
        Principal::Admin { .. } => true,
        Principal::User { user_id, .. } => *user_id == target,
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(UserVotesResponse {
            status: "error".to_string(),
            votes: BTreeMap::new(),
            error: Some("Cannot read another user's votes".to_string()),
        }));
    }

    let result = web::block(move || vote_ops.user_votes(target)).await?;

    match result {
        Ok(votes) => Ok(HttpResponse::Ok().json(UserVotesResponse {
            status: "ok".to_string(),
            votes,
            error: None,
        })),
        Err(e) => {
            error!("VOTES: user_votes(): user {}: {}", target, e);
            Ok(HttpResponse::build(status_for(&e)).json(UserVotesResponse {
                status: "error".to_string(),
                votes: BTreeMap::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}
