use super::Circle;
use super::enclose::{Lcg, enclose};

pub(super) fn pack_siblings(circles: &mut [Circle], random: &mut Lcg) -> f64 {
    let count = circles.len();
    if count == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if count == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if count == 2 {
        return circles[0].r + circles[1].r;
    }

    let (first, second) = (circles[0], circles[1]);
    place(second, first, &mut circles[2]);

    // Front chain as a ring of indices.
    let mut next = vec![0usize; count];
    let mut previous = vec![0usize; count];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    next[1] = 2;
    next[2] = 0;
    previous[0] = 2;
    previous[1] = 0;
    previous[2] = 1;

    let mut index = 3;
    'pack: while index < count {
        let (anchor_a, anchor_b) = (circles[a], circles[b]);
        place(anchor_a, anchor_b, &mut circles[index]);
        let candidate = circles[index];

        // Look for the closest intersecting circle along the chain, walking
        // forward from b and backward from a.
        let mut forward = next[b];
        let mut backward = previous[a];
        let mut forward_span = circles[b].r;
        let mut backward_span = circles[a].r;
        loop {
            if forward_span <= backward_span {
                if intersects(circles[forward], candidate) {
                    b = forward;
                    next[a] = b;
                    previous[b] = a;
                    continue 'pack;
                }
                forward_span += circles[forward].r;
                forward = next[forward];
            } else {
                if intersects(circles[backward], candidate) {
                    a = backward;
                    next[a] = b;
                    previous[b] = a;
                    continue 'pack;
                }
                backward_span += circles[backward].r;
                backward = previous[backward];
            }

            if forward == next[backward] {
                break;
            }
        }

        previous[index] = a;
        next[index] = b;
        next[a] = index;
        previous[b] = index;
        b = index;

        let mut best_score = score(circles, &next, a);
        let mut cursor = next[index];
        while cursor != b {
            let cursor_score = score(circles, &next, cursor);
            if cursor_score < best_score {
                a = cursor;
                best_score = cursor_score;
            }
            cursor = next[cursor];
        }
        b = next[a];

        index += 1;
    }

    let mut chain = vec![circles[b]];
    let mut cursor = next[b];
    while cursor != b {
        chain.push(circles[cursor]);
        cursor = next[cursor];
    }

    let enclosing = enclose(&chain, random);
    for circle in circles.iter_mut() {
        circle.x -= enclosing.x;
        circle.y -= enclosing.y;
    }
    enclosing.r
}

fn place(b: Circle, a: Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;

    if d2 > 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    if ab <= 0.0 {
        return a.x * a.x + a.y * a.y;
    }

    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
