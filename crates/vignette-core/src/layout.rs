/// Size actually painted for an image of `source` size shown in a `view` box.
///
/// With `preserve_ratio` the image is scaled uniformly to the largest size
/// that fits inside the box; a non-positive box side is treated as
/// unconstrained. Without it the image is stretched to the box exactly.
pub fn fit_within(source: [f64; 2], view: [f64; 2], preserve_ratio: bool) -> [f64; 2] {
    let [sw, sh] = source;
    let [vw, vh] = view;
    if !preserve_ratio || sw <= 0.0 || sh <= 0.0 {
        return view;
    }

    let factor = match (vw > 0.0, vh > 0.0) {
        (true, true) => (vw / sw).min(vh / sh),
        (true, false) => vw / sw,
        (false, true) => vh / sh,
        (false, false) => return source,
    };
    [sw * factor, sh * factor]
}

/// Axis-aligned bounding box `[width, height]` of a `size` rectangle rotated
/// by `degrees` about its center.
pub fn rotated_extent(size: [f64; 2], degrees: f64) -> [f64; 2] {
    let [w, h] = size;
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    [w * cos + h * sin, w * sin + h * cos]
}
