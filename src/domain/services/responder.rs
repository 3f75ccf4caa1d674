#[cfg(test)]
#[path = "responder_test.rs"]
mod tests;

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::domain::models::Event;
use crate::domain::models::Reply;

pub const CANNED_REPLIES: [&str; 7] = [
    "Hmm, interesting question! 🤔 Let me think... Sounds like you need some tech magic. What exactly?",
    "Oh, coding? I'm your robot sidekick! 🚀 Tell me the language, and I'll whip up some code.",
    "Just chatting? Awesome! What's on your mind? Life, the universe, or kung ano-ano? 😄",
    "Problem-solving mode activated! 🔧 Describe it, and I'll help brainstorm.",
    "Oops, my circuits glitched! 😅 Try rephrasing that one.",
    "Thinking... 🤔 Ah, got it! Here's a quick tip: [Insert witty advice].",
    "You're full of great questions! 💡 Want me to explain step-by-step?",
];

pub const IMAGE_REPLY: &str = "Nice photo! 📸 What would you like to know or do with it? I can describe it, analyze, or help with anything!";

pub const MIN_DELAY_MS: u64 = 1000;
pub const MAX_DELAY_MS: u64 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyPlan {
    pub delay: time::Duration,
    pub text: String,
}

impl ReplyPlan {
    pub fn new<R: Rng + ?Sized>(has_image: bool, rng: &mut R) -> ReplyPlan {
        let delay = time::Duration::from_millis(rng.gen_range(MIN_DELAY_MS..MAX_DELAY_MS));
        let mut text = CANNED_REPLIES
            .choose(rng)
            .copied()
            .unwrap_or(CANNED_REPLIES[0]);
        if has_image {
            text = IMAGE_REPLY;
        }

        return ReplyPlan {
            delay,
            text: text.to_string(),
        };
    }
}

struct PendingReply {
    conversation_id: String,
    handle: JoinHandle<()>,
}

/// Schedules simulated assistant replies. Each reply is bound to the
/// conversation it was scheduled for and arrives as an
/// `Event::AssistantReply` on the UI event channel.
pub struct Responder {
    tx: mpsc::UnboundedSender<Event>,
    pending: HashMap<u64, PendingReply>,
    next_ticket: u64,
}

impl Responder {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Responder {
        return Responder {
            tx,
            pending: HashMap::new(),
            next_ticket: 0,
        };
    }

    pub fn schedule(&mut self, conversation_id: &str, has_image: bool) -> u64 {
        let plan = ReplyPlan::new(has_image, &mut rand::thread_rng());
        return self.schedule_plan(conversation_id, plan);
    }

    pub fn schedule_plan(&mut self, conversation_id: &str, plan: ReplyPlan) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;

        tracing::debug!(
            ticket,
            conversation_id,
            delay_ms = plan.delay.as_millis() as u64,
            "scheduled reply"
        );

        let tx = self.tx.clone();
        let reply = Reply {
            ticket,
            conversation_id: conversation_id.to_string(),
            text: plan.text,
        };
        let handle = tokio::spawn(async move {
            time::sleep(plan.delay).await;
            if tx.send(Event::AssistantReply(reply)).is_err() {
                tracing::warn!(ticket, "reply dropped, event channel closed");
            }
        });

        self.pending.insert(
            ticket,
            PendingReply {
                conversation_id: conversation_id.to_string(),
                handle,
            },
        );

        return ticket;
    }

    pub fn is_pending(&self, conversation_id: &str) -> bool {
        return self
            .pending
            .values()
            .any(|p| return p.conversation_id == conversation_id);
    }

    pub fn pending_count(&self) -> usize {
        return self.pending.len();
    }

    /// Marks a delivered reply as no longer pending. Returns false for
    /// tickets that were cancelled or already completed.
    pub fn complete(&mut self, ticket: u64) -> bool {
        return self.pending.remove(&ticket).is_some();
    }

    /// Aborts every pending reply for a conversation, returning how many were
    /// cancelled.
    pub fn cancel(&mut self, conversation_id: &str) -> usize {
        let tickets = self
            .pending
            .iter()
            .filter(|(_, p)| return p.conversation_id == conversation_id)
            .map(|(ticket, _)| return *ticket)
            .collect::<Vec<u64>>();

        for ticket in tickets.iter() {
            if let Some(pending) = self.pending.remove(ticket) {
                pending.handle.abort();
            }
        }

        if !tickets.is_empty() {
            tracing::debug!(conversation_id, cancelled = tickets.len(), "cancelled replies");
        }

        return tickets.len();
    }

    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }
}
