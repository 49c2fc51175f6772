// Hit resolution between characters
//
// Every live hitbox is tested against every other character's hurtbox. All
// contacts are gathered before any is applied, so two fighters whose attacks
// land on the same tick both take their hits.

use log::debug;
use rand::Rng;

use crate::engine::physics::{check_collision, LevelGeometry};

use super::characters::{Character, CharacterId, Facing, HitOutcome, HitboxSpec};

/// One attack that connected
#[derive(Debug, Clone, PartialEq)]
pub struct HitReport {
    pub attacker: CharacterId,
    pub victim: CharacterId,
    pub damage: f32,
    pub outcome: HitOutcome,
}

struct Contact {
    attacker: usize,
    victim: usize,
    spec: HitboxSpec,
    facing: Facing,
}

/// Apply every hitbox/hurtbox contact for this tick
pub fn resolve_hits<R: Rng>(
    characters: &mut [Character],
    level: &LevelGeometry,
    rng: &mut R,
) -> Vec<HitReport> {
    let mut contacts = Vec::new();

    for (a, attacker) in characters.iter().enumerate() {
        let (Some(hitbox), Some(hit_area)) = (attacker.hitbox(), attacker.hitbox_aabb()) else {
            continue;
        };
        for (v, victim) in characters.iter().enumerate() {
            if a == v || !victim.is_hittable() || hitbox.has_struck(victim.id) {
                continue;
            }
            if check_collision(&hit_area, &victim.hurtbox_aabb()) {
                contacts.push(Contact {
                    attacker: a,
                    victim: v,
                    spec: *hitbox.spec(),
                    facing: hitbox.facing(),
                });
            }
        }
    }

    let mut reports = Vec::with_capacity(contacts.len());
    for contact in contacts {
        let victim_id = characters[contact.victim].id;
        characters[contact.attacker].register_hit(victim_id);

        let victim = &mut characters[contact.victim];
        let outcome = victim.take_hit(&contact.spec, contact.facing, level, rng);
        if outcome == HitOutcome::Ignored {
            continue;
        }

        let attacker_id = characters[contact.attacker].id;
        debug!("{} hit {}: {:?}", attacker_id, victim_id, outcome);
        reports.push(HitReport {
            attacker: attacker_id,
            victim: victim_id,
            damage: contact.spec.damage,
            outcome,
        });
    }

    reports
}
