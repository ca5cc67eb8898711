use crate::api::errors::{public_message, status_for};
use crate::auth::{PrincipalExtractor, UserPrincipal};
use crate::db::MessOperations;
use crate::enums::mess::{
    DailyQuoteResponse, LeaderboardQuery, LeaderboardResponse, MessMenuQuery, MessMenuResponse,
    MessUserVotesResponse, MessVoteRequest, MessVoteResponse,
};
use crate::services::mess_calendar::{clamp_window, day_name, parse_day};
use crate::traits::Validate;
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Datelike;
use std::collections::BTreeMap;

#[utoipa::path(
    tag = "Mess",
    params(MessMenuQuery),
    responses(
        (status = 200, description = "Meals and items served on the day", body = MessMenuResponse),
        (status = 400, description = "Unknown day name", body = MessMenuResponse)
    ),
    summary = "Mess menu for a day of the week"
)]
#[get("/menu")]
pub(crate) async fn mess_menu(
    _principal: PrincipalExtractor,
    mess_ops: web::Data<MessOperations>,
    query: web::Query<MessMenuQuery>,
) -> actix_web::Result<impl Responder> {
    let weekday = match query.into_inner().day {
        Some(raw) => match parse_day(&raw) {
            Some(d) => d,
            None => {
                return Ok(HttpResponse::BadRequest().json(MessMenuResponse {
                    status: "error".to_string(),
                    day: raw,
                    meals: BTreeMap::new(),
                    error: Some("day must be a day of the week".to_string()),
                }))
            }
        },
        None => mess_ops.today().weekday(),
    };

    let result = web::block(move || mess_ops.menu_for_day(weekday)).await?;

    match result {
        Ok(meals) => Ok(HttpResponse::Ok().json(MessMenuResponse {
            status: "ok".to_string(),
            day: day_name(weekday).to_string(),
            meals,
            error: None,
        })),
        Err(e) => {
            error!("MESS: mess_menu(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(MessMenuResponse {
                status: "error".to_string(),
                day: day_name(weekday).to_string(),
                meals: BTreeMap::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Mess",
    request_body = MessVoteRequest,
    responses(
        (status = 200, description = "Vote toggled; today's counts for the item", body = MessVoteResponse),
        (status = 400, description = "Item is not on today's menu", body = MessVoteResponse)
    ),
    summary = "Like or dislike an item on today's mess menu"
)]
#[post("/vote")]
pub(crate) async fn mess_vote(
    user: UserPrincipal,
    mess_ops: web::Data<MessOperations>,
    req_data: web::Json<MessVoteRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(HttpResponse::BadRequest().json(MessVoteResponse {
            success: false,
            likes: 0,
            dislikes: 0,
            user_vote: None,
            error: Some(msg),
        }));
    }

    let MessVoteRequest { meal, item, vote } = req_data.into_inner();
    let uid = user.user_id();
    let result = web::block(move || mess_ops.cast_vote(uid, &meal, &item, vote)).await?;

    match result {
        Ok((likes, dislikes, user_vote)) => Ok(HttpResponse::Ok().json(MessVoteResponse {
            success: true,
            likes,
            dislikes,
            user_vote,
            error: None,
        })),
        Err(e) => {
            error!("MESS: mess_vote(): user {}: {}", uid, e);
            Ok(HttpResponse::build(status_for(&e)).json(MessVoteResponse {
                success: false,
                likes: 0,
                dislikes: 0,
                user_vote: None,
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Mess",
    responses(
        (status = 200, description = "The caller's votes for today, keyed by meal:item", body = MessUserVotesResponse)
    ),
    summary = "Today's mess votes of the caller"
)]
#[get("/user-votes")]
pub(crate) async fn mess_user_votes(
    user: UserPrincipal,
    mess_ops: web::Data<MessOperations>,
) -> actix_web::Result<impl Responder> {
    let uid = user.user_id();
    let today = mess_ops.today();
    let result = web::block(move || mess_ops.user_votes(uid, today)).await?;

    match result {
        Ok(votes) => Ok(HttpResponse::Ok().json(MessUserVotesResponse {
            status: "ok".to_string(),
            date: today,
            votes,
            error: None,
        })),
        Err(e) => {
            error!("MESS: mess_user_votes(): user {}: {}", uid, e);
            Ok(HttpResponse::build(status_for(&e)).json(MessUserVotesResponse {
                status: "error".to_string(),
                date: today,
                votes: BTreeMap::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Mess",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Items ranked by likes minus dislikes", body = LeaderboardResponse)
    ),
    summary = "Mess item leaderboard"
)]
#[get("/leaderboard")]
pub(crate) async fn leaderboard(
    _principal: PrincipalExtractor,
    mess_ops: web::Data<MessOperations>,
    query: web::Query<LeaderboardQuery>,
) -> actix_web::Result<impl Responder> {
    let days = clamp_window(query.into_inner().days);
    let today = mess_ops.today();
    let result = web::block(move || mess_ops.leaderboard(today, days)).await?;

    match result {
        Ok(data) => Ok(HttpResponse::Ok().json(LeaderboardResponse {
            status: "ok".to_string(),
            days,
            data,
            error: None,
        })),
        Err(e) => {
            error!("MESS: leaderboard(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(LeaderboardResponse {
                status: "error".to_string(),
                days,
                data: Vec::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Mess",
    responses(
        (status = 200, description = "Quote of the day; data is null when none are configured", body = DailyQuoteResponse)
    ),
    summary = "Quote of the day"
)]
#[get("/daily-quote")]
pub(crate) async fn daily_quote(
    _principal: PrincipalExtractor,
    mess_ops: web::Data<MessOperations>,
) -> impl Responder {
    HttpResponse::Ok().json(DailyQuoteResponse {
        status: "ok".to_string(),
        data: mess_ops.quote_for(mess_ops.today()),
        error: None,
    })
}
