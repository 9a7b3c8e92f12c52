use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use crate::config::GAME_TICK_RATE_MS;
use crate::net::codec::{decode_client_bin, decode_client_json, encode_server_bin};
use crate::net::dispatcher::DispatcherHandle;

pub struct WsServer;

impl WsServer {
    pub async fn serve(addr: &str, dispatcher: DispatcherHandle) -> tokio::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("listening on {}", addr);
        let mut next_id: u64 = 1;

        let tick_dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_micros((GAME_TICK_RATE_MS * 1000.0) as u64));
            loop {
                ticker.tick().await;
                let outbound = tick_dispatcher.tick().await;
                for msg in outbound {
                    tick_dispatcher.send_outbound(msg).await;
                }
            }
        });

        loop {
            let (stream, peer) = listener.accept().await?;
            let dispatcher = dispatcher.clone();
            let session_id = next_id;
            next_id = next_id.saturating_add(1);
            info!("session {} connected from {}", session_id, peer);

            tokio::spawn(async move {
                let ws_stream = match accept_async(stream).await {
                    Ok(stream) => stream,
                    Err(_) => return,
                };
                let (mut ws_sender, mut ws_receiver) = ws_stream.split();
                let (outbound_tx, mut outbound_rx) = mpsc::channel(64);

                dispatcher.register_session(session_id, outbound_tx).await;

                loop {
                    tokio::select! {
                        inbound = ws_receiver.next() => {
                            match inbound {
                                Some(Ok(Message::Text(text))) => {
                                    if let Ok(msg) = decode_client_json(text.as_bytes()) {
                                        dispatcher.handle_inbound(session_id, msg).await;
                                    }
                                }
                                Some(Ok(Message::Binary(bytes))) => {
                                    let msg = decode_client_bin(&bytes)
                                        .or_else(|_| decode_client_json(&bytes));
                                    if let Ok(msg) = msg {
                                        dispatcher.handle_inbound(session_id, msg).await;
                                    }
                                }
                                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => {
                                    break;
                                }
                                _ => {}
                            }
                        }
                        outbound = outbound_rx.recv() => {
                            if let Some(msg) = outbound {
                                match encode_server_bin(&msg) {
                                    Ok(payload) => {
                                        let _ = ws_sender.send(Message::Binary(payload)).await;
                                    }
                                    Err(err) => {
                                        debug!("session {}: encode failed: {}", session_id, err);
                                    }
                                }
                            } else {
                                break;
                            }
                        }
                    }
                }

                debug!("session {} closed", session_id);
                dispatcher.unregister_session(session_id).await;
            });
        }
    }
}
