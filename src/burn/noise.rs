use glam::Vec3;

const OCTAVES: u32 = 4;
const LACUNARITY: f32 = 2.0;
const GAIN: f32 = 0.5;
// Value noise sums cluster around 0.5, stretch them back toward [0, 1].
const CONTRAST: f32 = 1.8;

/// Hash an integer lattice point to [0, 1].
fn lattice_hash(x: i32, y: i32, z: i32) -> f32 {
  let mut h = (x as u32).wrapping_mul(0x8da6_b343)
    ^ (y as u32).wrapping_mul(0xd816_3841)
    ^ (z as u32).wrapping_mul(0xcb1a_b31f);
  h ^= h >> 16;
  h = h.wrapping_mul(0x7feb_352d);
  h ^= h >> 15;
  h = h.wrapping_mul(0x846c_a68b);
  h ^= h >> 16;
  h as f32 / u32::MAX as f32
}

fn quintic(t: f32) -> f32 {
  t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
  a + (b - a) * t
}

/// 3D value noise in [0, 1].
/// param p: The sample point.
/// return: The noise value.
pub fn value_noise(p: Vec3) -> f32 {
  let cell = p.floor();
  let (x, y, z) = (cell.x as i32, cell.y as i32, cell.z as i32);
  let f = p - cell;
  let (u, v, w) = (quintic(f.x), quintic(f.y), quintic(f.z));

  let c000 = lattice_hash(x, y, z);
  let c100 = lattice_hash(x.wrapping_add(1), y, z);
  let c010 = lattice_hash(x, y.wrapping_add(1), z);
  let c110 = lattice_hash(x.wrapping_add(1), y.wrapping_add(1), z);
  let c001 = lattice_hash(x, y, z.wrapping_add(1));
  let c101 = lattice_hash(x.wrapping_add(1), y, z.wrapping_add(1));
  let c011 = lattice_hash(x, y.wrapping_add(1), z.wrapping_add(1));
  let c111 = lattice_hash(x.wrapping_add(1), y.wrapping_add(1), z.wrapping_add(1));

  let near = lerp(lerp(c000, c100, u), lerp(c010, c110, u), v);
  let far = lerp(lerp(c001, c101, u), lerp(c011, c111, u), v);
  lerp(near, far, w).clamp(0.0, 1.0)
}

/// Fractal sum of value noise octaves, normalized to [0, 1].
/// param p: The sample point.
/// return: The noise value.
pub fn fbm(p: Vec3) -> f32 {
  let mut sum = 0.0;
  let mut norm = 0.0;
  let mut amplitude = 1.0;
  let mut point = p;
  for _ in 0..OCTAVES {
    sum += value_noise(point) * amplitude;
    norm += amplitude;
    amplitude *= GAIN;
    point *= LACUNARITY;
  }
  sum / norm
}

/// Evaluate the burn field of a surface point.
/// The field only depends on the direction of the point, so it is independent of the mesh radius.
/// param position: The rest position.
/// param scale: The noise frequency.
/// return: The field value in [0, 1].
pub fn burn_field(position: Vec3, scale: f32) -> f32 {
  let direction = position.normalize_or_zero();
  let value = fbm(direction * scale);
  ((value - 0.5) * CONTRAST + 0.5).clamp(0.0, 1.0)
}
