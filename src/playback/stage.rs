use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::core::Fps;
use crate::foundation::error::{ConfigError, SpriteResult};
use crate::playback::player::{Advance, Player};
use crate::sheet::model::{AnimationMetadata, SpriteSheet};

/// What happened to one slot during [`Stage::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotAdvance {
    /// Slot name.
    pub slot: String,
    /// Player output for this slot.
    pub advance: Advance,
    /// Animation the slot was switched to because of a transition, if any.
    pub switched_to: Option<String>,
}

/// Owner of a sheet and the players showing it.
///
/// The stage resolves transition events by name: a known target rebinds the emitting
/// player, an unknown one is logged and ignored.
#[derive(Debug)]
pub struct Stage {
    animations: Vec<Arc<AnimationMetadata>>,
    slots: BTreeMap<String, Player>,
    fps: Fps,
}

impl Stage {
    /// Stage over `sheet` with every player ticking at `fps`.
    pub fn new(sheet: SpriteSheet, fps: Fps) -> Self {
        Self {
            animations: share(sheet),
            slots: BTreeMap::new(),
            fps,
        }
    }

    /// Create (or replace) a slot showing `animation`.
    pub fn add_slot(&mut self, slot: impl Into<String>, animation: &str) -> SpriteResult<()> {
        let anim = self.lookup(animation)?;
        self.slots.insert(slot.into(), Player::new(anim, self.fps));
        Ok(())
    }

    /// Drop a slot and its tick source.
    pub fn remove_slot(&mut self, slot: &str) -> Option<Player> {
        self.slots.remove(slot)
    }

    /// Switch a slot to another animation. Returns true when the position was reset.
    pub fn show(&mut self, slot: &str, animation: &str) -> SpriteResult<bool> {
        let anim = self.lookup(animation)?;
        let player = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| ConfigError::UnknownSlot(slot.to_string()))?;
        Ok(player.rebind(anim))
    }

    /// Change the rate of every slot.
    pub fn set_fps(&mut self, fps: Fps) {
        self.fps = fps;
        for player in self.slots.values_mut() {
            player.set_fps(fps);
        }
    }

    /// Replace the sheet wholesale (for example after a rebuild) and rebind every slot to
    /// the same-named animation. Slots whose animation disappeared keep the old binding.
    pub fn replace_sheet(&mut self, sheet: SpriteSheet) {
        self.animations = share(sheet);
        for (slot, player) in &mut self.slots {
            let name = player.state().animation().name.clone();
            match find(&self.animations, &name) {
                Some(anim) => {
                    player.rebind(anim);
                }
                None => {
                    tracing::warn!(slot = %slot, animation = %name, "animation missing from new sheet; keeping old binding");
                }
            }
        }
    }

    /// Feed elapsed time to every slot, following transitions.
    ///
    /// Ticks left over after a transition go to the target animation, so one call with
    /// 500ms gives the same result as five calls with 100ms.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<SlotAdvance> {
        let mut out = Vec::with_capacity(self.slots.len());
        for (slot, player) in &mut self.slots {
            let mut advance = player.advance(elapsed_ms);
            let mut ticks = advance.ticks;
            let mut switched_to = None;
            let mut last_event = None;
            // Each event costs at least one tick, so the chain ends.
            while let Some(event) = advance.transition.take() {
                let pending = advance.pending_ticks;
                advance = match find(&self.animations, &event.target) {
                    Some(target) => {
                        switched_to = Some(event.target.clone());
                        player.follow_transition(target, pending)
                    }
                    None => {
                        tracing::warn!(slot = %slot, target = %event.target, "transition target not in sheet; ignoring");
                        player.resume(pending)
                    }
                };
                ticks += advance.ticks;
                last_event = Some(event);
            }
            advance.transition = last_event;
            advance.ticks = ticks;
            out.push(SlotAdvance {
                slot: slot.clone(),
                advance,
                switched_to,
            });
        }
        out
    }

    /// Player of one slot.
    pub fn player(&self, slot: &str) -> Option<&Player> {
        self.slots.get(slot)
    }

    /// Mutable player of one slot, for play/pause control.
    pub fn player_mut(&mut self, slot: &str) -> Option<&mut Player> {
        self.slots.get_mut(slot)
    }

    /// Animations in sheet order.
    pub fn animations(&self) -> impl Iterator<Item = &AnimationMetadata> {
        self.animations.iter().map(|a| a.as_ref())
    }

    fn lookup(&self, name: &str) -> SpriteResult<Arc<AnimationMetadata>> {
        find(&self.animations, name)
            .ok_or_else(|| ConfigError::UnknownAnimation(name.to_string()).into())
    }
}

fn share(sheet: SpriteSheet) -> Vec<Arc<AnimationMetadata>> {
    sheet.into_animations().into_iter().map(Arc::new).collect()
}

fn find(animations: &[Arc<AnimationMetadata>], name: &str) -> Option<Arc<AnimationMetadata>> {
    animations.iter().find(|a| a.name == name).cloned()
}

#[cfg(test)]
#[path = "../../tests/unit/playback/stage.rs"]
mod tests;
