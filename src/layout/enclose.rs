use super::Circle;

/// Deterministic linear congruential generator used to shuffle enclosure
/// input so repeated layouts of the same tree are identical.
#[derive(Clone, Debug)]
pub(super) struct Lcg(u64);

impl Default for Lcg {
    fn default() -> Self {
        Self(1)
    }
}

impl Lcg {
    const MULTIPLIER: u64 = 1_664_525;
    const INCREMENT: u64 = 1_013_904_223;
    const MODULUS: u64 = 1 << 32;

    pub(super) fn next_unit(&mut self) -> f64 {
        self.0 = (Self::MULTIPLIER * self.0 + Self::INCREMENT) % Self::MODULUS;
        self.0 as f64 / Self::MODULUS as f64
    }
}

pub(super) fn enclose(circles: &[Circle], random: &mut Lcg) -> Circle {
    let mut shuffled = circles.to_vec();
    shuffle(&mut shuffled, random);

    let mut basis: Vec<Circle> = Vec::new();
    let mut enclosing: Option<Circle> = None;
    let mut index = 0;

    while index < shuffled.len() {
        let candidate = shuffled[index];
        if enclosing.is_some_and(|circle| encloses_weak(circle, candidate)) {
            index += 1;
            continue;
        }

        match extend_basis(&basis, candidate) {
            Some(next) => {
                basis = next;
                enclosing = Some(enclose_basis(&basis));
                index = 0;
            }
            None => return bounding_circle(circles),
        }
    }

    enclosing.unwrap_or_default()
}

fn shuffle(circles: &mut [Circle], random: &mut Lcg) {
    let mut remaining = circles.len();
    while remaining > 0 {
        let pick = (random.next_unit() * remaining as f64) as usize;
        remaining -= 1;
        circles.swap(remaining, pick.min(remaining));
    }
}

fn extend_basis(basis: &[Circle], candidate: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(candidate, basis) {
        return Some(vec![candidate]);
    }

    for &member in basis {
        if encloses_not(candidate, member) && encloses_weak_all(enclose_pair(member, candidate), basis)
        {
            return Some(vec![member, candidate]);
        }
    }

    for (i, &first) in basis.iter().enumerate() {
        for &second in &basis[i + 1..] {
            if encloses_not(enclose_pair(first, second), candidate)
                && encloses_not(enclose_pair(first, candidate), second)
                && encloses_not(enclose_pair(second, candidate), first)
                && encloses_weak_all(enclose_triple(first, second, candidate), basis)
            {
                return Some(vec![first, second, candidate]);
            }
        }
    }

    None
}

fn encloses_not(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match *basis {
        [a] => a,
        [a, b] => enclose_pair(a, b),
        [a, b, c] => enclose_triple(a, b, c),
        _ => bounding_circle(basis),
    }
}

fn enclose_pair(a: Circle, b: Circle) -> Circle {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dr = b.r - a.r;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= f64::EPSILON {
        return if a.r >= b.r { a } else { b };
    }

    Circle {
        x: (a.x + b.x + dx / distance * dr) / 2.0,
        y: (a.y + b.y + dy / distance * dr) / 2.0,
        r: (distance + a.r + b.r) / 2.0,
    }
}

fn enclose_triple(a: Circle, b: Circle, c: Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);

    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    if ab.abs() <= f64::EPSILON {
        return bounding_circle(&[a, b, c]);
    }

    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });

    Circle {
        x: x1 + xa + xb * r,
        y: y1 + ya + yb * r,
        r,
    }
}

fn bounding_circle(circles: &[Circle]) -> Circle {
    if circles.is_empty() {
        return Circle::default();
    }

    let count = circles.len() as f64;
    let x = circles.iter().map(|circle| circle.x).sum::<f64>() / count;
    let y = circles.iter().map(|circle| circle.y).sum::<f64>() / count;
    let r = circles
        .iter()
        .map(|circle| ((circle.x - x).powi(2) + (circle.y - y).powi(2)).sqrt() + circle.r)
        .fold(0.0, f64::max);

    Circle { x, y, r }
}
