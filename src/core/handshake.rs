use crate::domain::model::Session;
use crate::domain::ports::SeedApi;
use crate::utils::error::SeedError;

/// How a connection attempt between two sessions ended.
#[derive(Debug)]
pub enum Handshake {
    /// Request sent and accepted by the receiver.
    Accepted { request_id: String },
    /// The backend refused the request with 409 (pending or connected already).
    AlreadyConnected,
    /// Request sent but nothing matching showed up in the receiver's pending list.
    NoPendingMatch,
    SendFailed(SeedError),
    PendingListFailed(SeedError),
    AcceptFailed(SeedError),
}

/// Sends a connection request from `sender` to `receiver`, then accepts it on the
/// receiver's behalf by looking it up in the receiver's pending requests.
pub async fn connect<A: SeedApi + ?Sized>(
    api: &A,
    sender: &Session,
    receiver: &Session,
) -> Handshake {
    match api
        .send_connection_request(&sender.access_token, &receiver.doctor_id)
        .await
    {
        Ok(()) => {}
        Err(e) if e.is_already_exists() => return Handshake::AlreadyConnected,
        Err(e) => return Handshake::SendFailed(e),
    }

    let pending = match api.pending_requests(&receiver.access_token).await {
        Ok(pending) => pending,
        Err(e) => return Handshake::PendingListFailed(e),
    };

    let Some(request) = pending
        .into_iter()
        .find(|req| req.is_pending_from(&sender.doctor_id))
    else {
        return Handshake::NoPendingMatch;
    };

    match api
        .accept_connection(&receiver.access_token, &request.id)
        .await
    {
        Ok(()) => Handshake::Accepted {
            request_id: request.id,
        },
        Err(e) => Handshake::AcceptFailed(e),
    }
}
