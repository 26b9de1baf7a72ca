use crate::domain::models::membership::Membership;
use serde::Serialize;

#[derive(Serialize)]
pub struct JoinRequestResponse {
    pub message: String,
    pub request: Membership,
}
