use std::collections::{HashMap, VecDeque};

use log::info;

use crate::game::snapshot::{project, view_of};
use crate::game::world::World;
use crate::net::messages::{ClientMessage, GameSettings, ServerMessage};

/// A server message addressed to one session's socket. The hub emits
/// these; the dispatcher routes them onto the session's channel.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub session_id: u64,
    pub message: ServerMessage,
}

/// Connection-driven work, queued by the transport and applied at the start
/// of the next tick so the world only ever changes under the tick.
#[derive(Debug, Clone)]
pub enum Command {
    Connect { session_id: u64 },
    Disconnect { session_id: u64 },
    Input { session_id: u64, angle: f32, boosting: bool },
    Respawn { session_id: u64 },
}

/// Single arena shared by every session: owns the world, the session
/// roster, and the command queue between ticks.
pub struct Hub {
    world: World,
    sessions: Vec<u64>,
    snake_ids: HashMap<u64, String>,
    pending: VecDeque<Command>,
}

impl Hub {
    pub fn new() -> Self {
        let mut world = World::new();
        world.init();
        Self::with_world(world)
    }

    pub fn with_world(world: World) -> Self {
        Self {
            world,
            sessions: Vec::new(),
            snake_ids: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn enqueue_message(&mut self, session_id: u64, message: ClientMessage) {
        let command = match message {
            ClientMessage::Input { angle, boosting } => Command::Input {
                session_id,
                angle,
                boosting,
            },
            ClientMessage::Respawn => Command::Respawn { session_id },
            ClientMessage::Leave => Command::Disconnect { session_id },
        };
        self.enqueue(command);
    }

    /// One full server tick: drain the queued commands in arrival order,
    /// step the world, then fan out death events and the fresh snapshot.
    pub fn tick(&mut self) -> Vec<OutboundMessage> {
        let mut out = Vec::new();

        while let Some(command) = self.pending.pop_front() {
            match command {
                Command::Connect { session_id } => self.handle_connect(session_id, &mut out),
                Command::Disconnect { session_id } => self.handle_disconnect(session_id, &mut out),
                Command::Input {
                    session_id,
                    angle,
                    boosting,
                } => {
                    if let Some(snake_id) = self.snake_ids.get(&session_id) {
                        self.world.set_input(snake_id, angle, boosting);
                    }
                }
                Command::Respawn { session_id } => self.handle_respawn(session_id, &mut out),
            }
        }

        self.world.tick();

        for event in self.world.take_events() {
            self.broadcast(
                ServerMessage::PlayerDied {
                    id: event.id,
                    killer_id: event.killer_id,
                    killer_name: event.killer_name,
                    score: event.score,
                },
                &mut out,
            );
        }

        let state = project(&self.world);
        for &session_id in &self.sessions {
            out.push(OutboundMessage {
                session_id,
                message: ServerMessage::GameState {
                    state: state.clone(),
                },
            });
        }

        out
    }

    fn handle_connect(&mut self, session_id: u64, out: &mut Vec<OutboundMessage>) {
        if self.snake_ids.contains_key(&session_id) {
            return;
        }
        let snake_id = format!("player_{}", session_id);
        let name = format!("Player_{}", session_id);
        let view = view_of(self.world.connect(&snake_id, &name));
        self.snake_ids.insert(session_id, snake_id);
        self.sessions.push(session_id);
        info!("session {} joined as {}", session_id, name);

        out.push(OutboundMessage {
            session_id,
            message: ServerMessage::Welcome {
                player_id: view.id.clone(),
                state: project(&self.world),
                settings: GameSettings::current(),
            },
        });
        for &other in &self.sessions {
            if other != session_id {
                out.push(OutboundMessage {
                    session_id: other,
                    message: ServerMessage::PlayerJoined {
                        snake: view.clone(),
                    },
                });
            }
        }
    }

    fn handle_disconnect(&mut self, session_id: u64, out: &mut Vec<OutboundMessage>) {
        if let Some(snake_id) = self.snake_ids.remove(&session_id) {
            self.world.disconnect(&snake_id);
            self.sessions.retain(|&s| s != session_id);
            info!("session {} left", session_id);
            self.broadcast(ServerMessage::PlayerLeft { id: snake_id }, out);
        }
    }

    fn handle_respawn(&mut self, session_id: u64, out: &mut Vec<OutboundMessage>) {
        let snake_id = match self.snake_ids.get(&session_id) {
            Some(snake_id) => snake_id.clone(),
            None => return,
        };
        let fallback = format!("Player_{}", session_id);
        if let Some(snake) = self.world.respawn(&snake_id, &fallback) {
            let view = view_of(snake);
            self.broadcast(ServerMessage::PlayerRespawned { snake: view }, out);
        }
    }

    fn broadcast(&self, message: ServerMessage, out: &mut Vec<OutboundMessage>) {
        for &session_id in &self.sessions {
            out.push(OutboundMessage {
                session_id,
                message: message.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> Hub {
        Hub::with_world(World::with_seed(99))
    }

    fn messages_for(out: &[OutboundMessage], session_id: u64) -> Vec<&ServerMessage> {
        out.iter()
            .filter(|m| m.session_id == session_id)
            .map(|m| &m.message)
            .collect()
    }

    #[test]
    fn connect_gets_welcome_then_state() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });

        let out = hub.tick();
        let mine = messages_for(&out, 1);
        assert!(matches!(
            mine[0],
            ServerMessage::Welcome { player_id, .. } if player_id == "player_1"
        ));
        assert!(matches!(
            mine.last().unwrap(),
            ServerMessage::GameState { .. }
        ));
    }

    #[test]
    fn welcome_state_already_contains_own_snake() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });

        let out = hub.tick();
        let mine = messages_for(&out, 1);
        match mine[0] {
            ServerMessage::Welcome { state, .. } => {
                assert!(state.players.contains_key("player_1"));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn join_is_announced_to_others_only() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });
        hub.tick();

        hub.enqueue(Command::Connect { session_id: 2 });
        let out = hub.tick();

        let joined_targets: Vec<u64> = out
            .iter()
            .filter(|m| matches!(m.message, ServerMessage::PlayerJoined { .. }))
            .map(|m| m.session_id)
            .collect();
        assert_eq!(joined_targets, vec![1]);
    }

    #[test]
    fn input_is_applied_on_the_next_tick() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });
        hub.tick();

        hub.enqueue_message(
            1,
            ClientMessage::Input {
                angle: 2.5,
                boosting: true,
            },
        );
        hub.tick();

        let snake = hub.world().snake("player_1").unwrap();
        assert_eq!(snake.target_angle, 2.5);
    }

    #[test]
    fn input_from_unknown_session_is_dropped() {
        let mut hub = hub();
        hub.enqueue_message(
            7,
            ClientMessage::Input {
                angle: 1.0,
                boosting: false,
            },
        );
        // Must not panic, and no snake appears.
        hub.tick();
        assert!(hub.world().snake("player_7").is_none());
    }

    #[test]
    fn leave_is_broadcast_to_remaining_sessions() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });
        hub.enqueue(Command::Connect { session_id: 2 });
        hub.tick();

        hub.enqueue_message(1, ClientMessage::Leave);
        let out = hub.tick();

        let left: Vec<u64> = out
            .iter()
            .filter(|m| matches!(&m.message, ServerMessage::PlayerLeft { id } if id == "player_1"))
            .map(|m| m.session_id)
            .collect();
        assert_eq!(left, vec![2]);
        assert!(hub.world().snake("player_1").is_none());
    }

    #[test]
    fn death_is_broadcast_to_every_session() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });
        hub.enqueue(Command::Connect { session_id: 2 });
        hub.tick();

        // March player_1 east until something kills it: the east wall, or
        // a body on the way there. Either way the death must fan out.
        hub.enqueue_message(
            1,
            ClientMessage::Input {
                angle: 0.0,
                boosting: false,
            },
        );
        let mut died_targets = Vec::new();
        for _ in 0..600 {
            let out = hub.tick();
            for m in &out {
                if let ServerMessage::PlayerDied { id, .. } = &m.message {
                    if id == "player_1" {
                        died_targets.push(m.session_id);
                    }
                }
            }
            if !died_targets.is_empty() {
                break;
            }
        }
        died_targets.sort_unstable();
        assert_eq!(died_targets, vec![1, 2]);
    }

    #[test]
    fn respawn_while_alive_is_silent() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });
        hub.tick();

        hub.enqueue_message(1, ClientMessage::Respawn);
        let out = hub.tick();

        assert!(!out
            .iter()
            .any(|m| matches!(m.message, ServerMessage::PlayerRespawned { .. })));
    }

    #[test]
    fn commands_apply_before_the_world_steps() {
        let mut hub = hub();
        hub.enqueue(Command::Connect { session_id: 1 });
        // Same-tick input arrives after the connect but before the step.
        hub.enqueue_message(
            1,
            ClientMessage::Input {
                angle: 0.5,
                boosting: false,
            },
        );
        hub.tick();
        assert_eq!(hub.world().snake("player_1").unwrap().target_angle, 0.5);
    }
}
