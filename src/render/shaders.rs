/// Vertex shader for the foliage point cloud.
/// Must stay in step with `animation::evaluate_foliage_vertex`.
pub const FOLIAGE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 aScatterPos;
layout(location = 1) in vec3 aTreePos;
layout(location = 2) in float aRandom;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float uTime;
uniform float uRatio;
uniform float uPixelRatio;
uniform float uSettle;
uniform float uTreeHeight;
uniform float uTreeRadius;

out float vAlpha;
out float vRandom;

float easeInOutCubic(float x) {
    return x < 0.5 ? 4.0 * x * x * x : 1.0 - pow(-2.0 * x + 2.0, 3.0) / 2.0;
}

vec3 coneNormal(vec3 p) {
    float rho = length(p.xz);
    if (rho <= 1.0e-7 || uTreeHeight <= 0.0) {
        return vec3(0.0, 1.0, 0.0);
    }
    return normalize(vec3(p.x / rho * uTreeHeight, uTreeRadius, p.z / rho * uTreeHeight));
}

void main() {
    vRandom = aRandom;

    float t = easeInOutCubic(clamp(uRatio, 0.0, 1.0));
    vec3 pos = mix(aScatterPos, aTreePos, t);

    if (t > uSettle) {
        // Breathing along the cone normal plus a slow twist
        float breathe = sin(uTime * 1.5 + pos.y * 0.5) * 0.1;
        pos += coneNormal(aTreePos) * breathe;
        float angle = uTime * 0.2 + pos.y * 0.2;
        pos.x += cos(angle * 0.1) * 0.1;
        pos.z += sin(angle * 0.1) * 0.1;
    } else {
        pos.x += sin(uTime + aRandom * 10.0) * 0.2;
        pos.y += cos(uTime * 0.8 + aRandom * 10.0) * 0.2;
    }

    vec4 view_pos = u_view * vec4(pos, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = (4.0 * uPixelRatio + aRandom * 2.0) * (15.0 / -view_pos.z);

    // Soft fade with view depth
    vAlpha = smoothstep(50.0, 0.0, -view_pos.z);
}
"#;

/// Fragment shader for the foliage point cloud
pub const FOLIAGE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float vAlpha;
in float vRandom;

uniform vec3 uColor;

out vec4 fragColor;

void main() {
    float r = distance(gl_PointCoord, vec2(0.5));
    if (r > 0.5) {
        discard;
    }

    float glow = pow(1.0 - r * 2.0, 1.5);

    vec3 color = uColor;
    if (vRandom > 0.9) {
        color = mix(uColor, vec3(1.0, 0.8, 0.4), 0.5);
    }

    fragColor = vec4(color, glow * 0.8 * vAlpha);
}
"#;

/// Vertex shader for instanced ornaments, ribbon and star
pub const INSTANCED_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance_matrix;
layout(location = 6) in vec3 a_instance_color;

uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;
out vec3 v_color;

void main() {
    vec4 world_pos = a_instance_matrix * vec4(a_position, 1.0);
    v_world_position = world_pos.xyz;
    v_normal = mat3(a_instance_matrix) * a_normal;
    v_color = a_instance_color;
    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader for instanced elements. Writes to a float target:
/// over-bright instance colours must survive until the bloom pass.
pub const INSTANCED_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform float u_emissive;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);
    vec3 light_dir = normalize(vec3(0.5, 1.0, 0.3));

    float ndotl = max(dot(normal, light_dir), 0.0);
    vec3 half_dir = normalize(light_dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), 48.0);

    // No clamp and no tone mapping here
    vec3 color = v_color * (0.35 + ndotl * 0.65) + vec3(spec) * 0.5;
    color += v_color * u_emissive;

    fragColor = vec4(color, 1.0);
}
"#;

/// Linear channel value where over-bright instance colours start to glow
pub const BLOOM_THRESHOLD: f32 = 1.0;
/// Width of the soft transition below the threshold
pub const BLOOM_KNEE: f32 = 0.5;

/// Bright-pass for the bloom stage. Works on the brightest channel with a
/// soft knee so micro-light twinkles (up to 3x) and the ribbon pulse feed
/// the blur while ordinary lit surfaces stay out of it.
pub const BLOOM_EXTRACT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_scene;
uniform float u_threshold;
uniform float u_knee;

out vec4 fragColor;

void main() {
    vec3 color = texture(u_scene, v_uv).rgb;
    float peak = max(color.r, max(color.g, color.b));

    float soft = clamp(peak - u_threshold + u_knee, 0.0, 2.0 * u_knee);
    soft = soft * soft / (4.0 * u_knee + 1.0e-4);
    float contribution = max(soft, peak - u_threshold) / max(peak, 1.0e-4);

    fragColor = vec4(color * contribution, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaders_not_empty() {
        assert!(!FOLIAGE_VERTEX_SHADER.is_empty());
        assert!(!FOLIAGE_FRAGMENT_SHADER.is_empty());
        assert!(!INSTANCED_VERTEX_SHADER.is_empty());
        assert!(!INSTANCED_FRAGMENT_SHADER.is_empty());
    }

    #[test]
    fn test_shader_version() {
        for src in [
            FOLIAGE_VERTEX_SHADER,
            FOLIAGE_FRAGMENT_SHADER,
            INSTANCED_VERTEX_SHADER,
            INSTANCED_FRAGMENT_SHADER,
            BLOOM_EXTRACT_SHADER,
        ] {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_foliage_uniforms_declared() {
        for name in ["uTime", "uRatio", "uPixelRatio", "uSettle", "uTreeHeight", "uTreeRadius"] {
            assert!(FOLIAGE_VERTEX_SHADER.contains(&format!("uniform float {};", name)), "{}", name);
        }
        for attr in ["aScatterPos", "aTreePos", "aRandom"] {
            assert!(FOLIAGE_VERTEX_SHADER.contains(attr));
        }
    }

    #[test]
    fn test_bloom_pass_reads_unclamped_scene() {
        assert!(BLOOM_EXTRACT_SHADER.contains("uniform float u_threshold;"));
        assert!(BLOOM_EXTRACT_SHADER.contains("max(color.r, max(color.g, color.b))"));
        assert!(BLOOM_EXTRACT_SHADER.contains("uniform float u_knee;"));
        assert!(BLOOM_KNEE > 0.0 && BLOOM_KNEE < BLOOM_THRESHOLD);
    }

    #[test]
    fn test_instanced_fragment_does_not_clamp() {
        assert!(!INSTANCED_FRAGMENT_SHADER.contains("clamp("));
        assert!(!INSTANCED_FRAGMENT_SHADER.contains("pow(final_color"));
    }
}
