//! Collision resolution by absorption
//!
//! When two bounding circles overlap and absorption is enabled, one body
//! swallows the other. The merge conserves mass and momentum and keeps the
//! density `mass / radius^3` of the absorber unchanged.

use crate::simulation::states::Body;

/// Role of the body whose update is running in a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorber {
    /// The running body absorbs its neighbor
    This,
    /// The neighbor absorbs the running body
    Other,
}

/// Decide which side of a collision survives.
///
/// A fixed body always wins (the running body first if both are fixed),
/// otherwise the heavier body wins. Equal masses resolve to the running body.
pub fn absorber(this: &Body, other: &Body) -> Absorber {
    if this.is_fixed {
        return Absorber::This;
    }
    if other.is_fixed {
        return Absorber::Other;
    }
    if this.mass >= other.mass {
        Absorber::This
    } else {
        Absorber::Other
    }
}

/// Merge `loser` into `winner` and kill `loser`.
///
/// - mass: sum of both masses
/// - position: center of mass, unless the winner is fixed
/// - velocity: total momentum / new mass, unless the winner is fixed
/// - radius: `r * cbrt(m_new / m_old)`
///
/// Both masses are expected to be positive.
pub fn absorb(winner: &mut Body, loser: &mut Body) {
    let m_old = winner.mass;
    let m_new = winner.mass + loser.mass;

    // Σ m v over both bodies, Cartesian
    let p_total = winner.momentum() + loser.momentum();

    if !winner.is_fixed {
        // Center of mass
        winner.x = (winner.mass * winner.x + loser.mass * loser.x) / m_new;
        winner.set_velocity(p_total / m_new);
    }

    winner.radius *= (m_new / m_old).cbrt();
    winner.mass = m_new;

    loser.kill();
}
