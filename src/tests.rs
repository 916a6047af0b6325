#[cfg(test)]
use super::*;
use float_cmp::approx_eq;

fn close(a: f64, b: f64) -> bool {
    approx_eq!(f64, a, b, epsilon = 1e-9 * b.abs().max(1.))
}

fn vectors2() -> TVector2Array {
    TVector2Array::new(Array1::zeros(10), Array1::range(0., 10., 1.))
}

fn vectors3() -> TVector3Array {
    TVector3Array::new(Array1::zeros(10), Array1::range(0., 10., 1.), Array1::zeros(10))
}

fn lorentz_vectors() -> TLorentzVectorArray {
    TLorentzVectorArray::new(Array1::zeros(10), Array1::range(0., 10., 1.), Array1::zeros(10), Array1::zeros(10))
}

const OFFSETS: [usize; 5] = [0, 3, 3, 5, 10];

/// Expected grouping of ten elements over `OFFSETS`.
fn grouped<T: Clone>(items: Vec<T>) -> Vec<Vec<T>> {
    OFFSETS.windows(2).map(|w| items[w[0]..w[1]].to_vec()).collect()
}

#[test]
fn test_vector2() {
    let mut a = TVector2::new(4.4, 5.5);
    assert_eq!(a.dot(&a).unwrap(), 49.61);
    assert_eq!(a + TVector2::new(1000., 2000.), TVector2::new(1004.4, 2005.5));
    assert_eq!(a - TVector2::new(1000., 2000.), TVector2::new(-995.6, -1994.5));
    assert_eq!(TVector2::new(1000., 2000.) - a, TVector2::new(995.6, 1994.5));
    assert_eq!(a * 1000., TVector2::new(4400., 5500.));
    assert_eq!(1000. * a, TVector2::new(4400., 5500.));
    assert_eq!(a / 1000., TVector2::new(0.0044, 0.0055));
    assert_eq!(1000. / a, TVector2::new(227.27272727272725, 181.8181818181818));
    assert_eq!(a.pow(2.), 49.61);
    assert_eq!(a.pow(1.), 7.043436661176133);
    assert_eq!(a.abs(), 7.043436661176133);
    assert_eq!(-a, TVector2::new(-4.4, -5.5));
    assert_eq!(-(-a), a);
    assert_eq!(a + (-a), TVector2::new(0., 0.));
    assert_eq!(a - a, TVector2::new(0., 0.));

    //Division by zero follows IEEE-754
    let b = TVector2::new(4.4, 0.) / 0.;
    assert_eq!(b.x, f64::INFINITY);
    assert!(b.y.is_nan());
    let c = 1. / TVector2::new(4.4, 0.);
    assert!(close(c.x, 1. / 4.4));
    assert_eq!(c.y, f64::INFINITY);

    a += TVector2::new(100., 200.);
    assert_eq!(a, TVector2::new(104.4, 205.5));
    a *= 10.;
    assert_eq!(a, TVector2::new(1044., 2055.));
    a /= 10.;
    a -= TVector2::new(100., 200.);
    assert!(close(a.x, 4.4) && close(a.y, 5.5));
}

#[test]
fn test_vector2_coordinates() {
    let a = TVector2::from_polar(2., PI / 2.);
    assert!(approx_eq!(f64, a.x, 0., epsilon = 1e-12));
    assert!(close(a.y, 2.));
    assert!(close(a.phi(), PI / 2.));
    assert!(close(a.rho(), 2.));

    let b = a.rotate(PI / 2.);
    assert!(close(b.x, -2.));
    assert!(approx_eq!(f64, b.y, 0., epsilon = 1e-12));

    //Azimuthal differences wrap into [-pi, pi)
    let c = TVector2::from_polar(1., 3.);
    let d = TVector2::from_polar(1., -3.);
    assert!(close(c.delta_phi(&d).unwrap(), 6. - TWO_PI));
    assert!(close(d.delta_phi(&c).unwrap(), TWO_PI - 6.));

    assert!(close(TVector2::new(3., 4.).unit().abs(), 1.));
    assert!(matches!(a.cross(&b), Err(VectorError::UnsupportedOperation(_))));
}

#[test]
fn test_vector2_array() {
    let a = vectors2();
    let expected: Vec<TVector2> = (0..10).map(|i| TVector2::new(0., i as f64)).collect();
    assert_eq!(a.tolist(), expected);
    assert_eq!(a.get(5).unwrap(), TVector2::new(0., 5.));
    assert_eq!(a.get(-1).unwrap(), TVector2::new(0., 9.));
    assert_eq!(a.y.to_vec(), (0..10).map(|i| i as f64).collect::<Vec<f64>>());

    let squares: Array1<f64> = (0..10).map(|i| (i * i) as f64).collect();
    assert_eq!(a.mag2(), squares);
    assert_eq!(a.pow(2.), squares);
    for (i, value) in a.pow(3.).iter().enumerate() {
        assert!(close(*value, (i * i * i) as f64), "a**3 [{}]: {}", i, value);
    }

    let shifted = a.clone() + TVector2::new(1000., 2000.);
    assert_eq!(shifted.get(5).unwrap(), TVector2::new(1000., 2005.));
    for i in 0..10 {
        assert_eq!(shifted.get(i).unwrap(), a.get(i).unwrap() + TVector2::new(1000., 2000.));
    }
    let expected = TVector2Array::new(Array1::from_elem(10, 1000.), Array1::range(2000., 2010., 1.));
    assert!(shifted.eq_mask(&expected).unwrap().iter().all(|&flag| flag));

    let mut b = a.clone();
    b += TVector2::new(1., 1.);
    b *= 2.;
    assert_eq!(b.get(3).unwrap(), TVector2::new(2., 8.));
    assert_eq!(&b - &b, TVector2Array::splat(&TVector2::new(0., 0.), 10));

    assert_eq!(a.rotatez(0.), a);
    let round_trip = a.rotatez(0.7).rotatez(-0.7);
    for (back, original) in round_trip.iter().zip(a.iter()) {
        assert!(approx_eq!(f64, back.x, original.x, epsilon = 1e-9) && close(back.y, original.y));
    }

    //Columns reassigned to a different length are caught before any arithmetic
    let mut broken = a.clone();
    broken.y = Array1::zeros(3);
    assert_eq!(broken.try_add(&a), Err(VectorError::ShapeMismatch { expected: 10, found: 3 }));
    assert_eq!(a.try_add(&broken), Err(VectorError::ShapeMismatch { expected: 10, found: 3 }));
    assert!(a.dot(&broken).is_err());
}

#[test]
fn test_vector3() {
    let mut a = TVector3::new(4.4, 5.5, 0.);
    assert_eq!(a.dot(&a).unwrap(), 49.61);
    assert_eq!(a.cross(&a).unwrap(), TVector3::new(0., 0., 0.));
    assert_eq!(a + TVector3::new(1000., 2000., 0.), TVector3::new(1004.4, 2005.5, 0.));
    assert_eq!(a - TVector3::new(1000., 2000., 0.), TVector3::new(-995.6, -1994.5, 0.));
    assert_eq!(TVector3::new(1000., 2000., 0.) - a, TVector3::new(995.6, 1994.5, 0.));
    assert_eq!(a * 1000., TVector3::new(4400., 5500., 0.));
    assert_eq!(1000. * a, TVector3::new(4400., 5500., 0.));
    assert_eq!(a / 1000., TVector3::new(0.0044, 0.0055, 0.));
    assert_eq!(1000. / (a + TVector3::new(0., 0., 1.)), TVector3::new(227.27272727272725, 181.8181818181818, 1000.));
    assert_eq!(a.pow(2.), 49.61);
    assert_eq!(a.pow(1.), 7.043436661176133);
    assert_eq!(a.abs(), 7.043436661176133);
    assert_eq!(-a, TVector3::new(-4.4, -5.5, 0.));

    let arot = a.rotatez(PI);
    assert!(close(arot.x, -a.x));
    assert!(close(arot.y, -a.y));
    assert_eq!(arot.z, a.z);
    assert_eq!(a.rotatez(0.), a);
    let round_trip = a.rotatez(0.7).rotatez(-0.7);
    assert!(close(round_trip.x, a.x) && close(round_trip.y, a.y));

    a += TVector3::new(100., 200., 0.);
    assert_eq!(a, TVector3::new(104.4, 205.5, 0.));
    a *= 10.;
    assert_eq!(a, TVector3::new(1044., 2055., 0.));
    assert_eq!(a.angle(&a).unwrap(), 0.);
    assert_eq!(a.angle(&(a * 3.)).unwrap(), 0.);
    assert!(close(a.angle(&(-2. * a)).unwrap(), PI));
    assert!(close(a.angle(&a.rotatez(0.01)).unwrap(), 0.01));
    assert!(close(a.angle(&a.rotatez(-0.01)).unwrap(), 0.01));
    assert_eq!(a.angle(&(a * 0.)).unwrap(), 0.);
    assert_eq!(TVector3::new(0., 0., 0.).angle(&a).unwrap(), 0.);
}

#[test]
fn test_vector3_coordinates() {
    let a = TVector3::from_spherical(2., PI / 2., PI / 2.);
    assert!(approx_eq!(f64, a.x, 0., epsilon = 1e-12));
    assert!(close(a.y, 2.));
    assert!(approx_eq!(f64, a.z, 0., epsilon = 1e-12));

    let b = TVector3::from_cylindrical(1., 0., 1.);
    assert_eq!(b, TVector3::new(1., 0., 1.));
    assert!(close(b.rho(), 1.));
    assert!(close(b.theta(), PI / 4.));
    assert!(close(b.eta(), (1_f64).asinh()));
    assert!(approx_eq!(f64, b.phi(), 0., epsilon = 1e-12));

    //Rotations about x and y follow the right-hand rule
    let y = TVector3::new(0., 1., 0.).rotatex(PI / 2.);
    assert!(approx_eq!(f64, y.y, 0., epsilon = 1e-12) && close(y.z, 1.));
    let z = TVector3::new(0., 0., 1.).rotatey(PI / 2.);
    assert!(close(z.x, 1.) && approx_eq!(f64, z.z, 0., epsilon = 1e-12));

    //Rotation about the z axis matches rotatez; a zero axis does nothing
    let c = TVector3::new(1., 2., 3.);
    let about_z = c.rotate_axis(&TVector3::new(0., 0., 5.), 0.3);
    let expected = c.rotatez(0.3);
    assert!(close(about_z.x, expected.x) && close(about_z.y, expected.y) && close(about_z.z, expected.z));
    assert_eq!(c.rotate_axis(&TVector3::new(0., 0., 0.), 0.3), c);

    let cross = TVector3::new(1., 0., 0.).cross(&TVector3::new(0., 1., 0.)).unwrap();
    assert_eq!(cross, TVector3::new(0., 0., 1.));
}

#[test]
fn test_vector3_array() {
    let a = vectors3();
    let expected: Vec<TVector3> = (0..10).map(|i| TVector3::new(0., i as f64, 0.)).collect();
    assert_eq!(a.tolist(), expected);
    assert_eq!(a.get(5).unwrap(), TVector3::new(0., 5., 0.));

    let squares: Array1<f64> = (0..10).map(|i| (i * i) as f64).collect();
    assert_eq!(a.mag2(), squares);
    assert_eq!((a.clone() + TVector3::new(1000., 2000., 0.)).get(5).unwrap(), TVector3::new(1000., 2005., 0.));

    let arot = a.rotatez(PI);
    for (aroti, ai) in arot.iter().zip(a.iter()) {
        assert!(approx_eq!(f64, aroti.x, -ai.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, aroti.y, -ai.y, epsilon = 1e-9));
        assert_eq!(aroti.z, ai.z);
    }

    assert!(a.angle(&a).unwrap().iter().all(|&angle| angle == 0.));
    assert!(a.angle(&(3. * &a)).unwrap().iter().all(|&angle| angle == 0.));
    //First element is the null vector
    let tail = a.slice(1..10).unwrap();
    for angle in tail.angle(&(-2. * &tail)).unwrap().iter() {
        assert!(close(*angle, PI));
    }
    assert_eq!(a.angle(&(-2. * &a)).unwrap()[0], 0.);

    let crossed = a.cross(&TVector3Array::splat(&TVector3::new(1., 0., 0.), 10)).unwrap();
    assert_eq!(crossed.get(2).unwrap(), TVector3::new(0., 0., -2.));
}

#[test]
fn test_lorentzvector() {
    let mut a = TLorentzVector::new(4.4, 5.5, 0., 0.);
    assert_eq!(a.dot(&a).unwrap(), -49.61);
    assert_eq!(a + TLorentzVector::new(1000., 2000., 0., 0.), TLorentzVector::new(1004.4, 2005.5, 0., 0.));
    assert_eq!(a - TLorentzVector::new(1000., 2000., 0., 0.), TLorentzVector::new(-995.6, -1994.5, 0., 0.));
    assert_eq!(TLorentzVector::new(1000., 2000., 0., 0.) - a, TLorentzVector::new(995.6, 1994.5, 0., 0.));
    assert_eq!(a * 1000., TLorentzVector::new(4400., 5500., 0., 0.));
    assert_eq!(1000. * a, TLorentzVector::new(4400., 5500., 0., 0.));
    assert_eq!(a / 1000., TLorentzVector::new(0.0044, 0.0055, 0., 0.));
    assert_eq!(
        1000. / (a + TLorentzVector::new(0., 0., 1., 1.)),
        TLorentzVector::new(227.27272727272725, 181.8181818181818, 1000., 1000.)
    );
    assert_eq!(a.pow(2.), -49.61);
    assert_eq!(a.mag2(), -49.61);
    assert!(close(a.mag(), -(49.61_f64).sqrt()));
    let timelike = a + TLorentzVector::new(0., 0., 0., 10.);
    assert!(close(timelike.pow(1.), 7.098591409568521));
    assert!(close(timelike.abs(), 7.098591409568521));
    assert_eq!(-a, TLorentzVector::new(-4.4, -5.5, 0., 0.));

    let arot = a.rotatez(PI);
    assert!(close(arot.x, -a.x));
    assert!(close(arot.y, -a.y));
    assert_eq!(arot.z, a.z);
    assert_eq!(arot.t, a.t);

    a += TLorentzVector::new(100., 200., 0., 0.);
    assert_eq!(a, TLorentzVector::new(104.4, 205.5, 0., 0.));
    a *= 10.;
    assert_eq!(a, TLorentzVector::new(1044., 2055., 0., 0.));
}

#[test]
fn test_lorentzvector_kinematics() {
    let a = PtEtaPhiMassLorentzVector(30., 1.2, -0.4, 5.);
    assert!(close(a.pt(), 30.));
    assert!(close(a.eta(), 1.2));
    assert!(close(a.phi(), -0.4));
    assert!(close(a.mass(), 5.));
    assert!(close(a.mass2(), 25.));
    assert!(close(a.perp(), a.pt()));
    assert!(close(a.pt2(), 900.));
    assert!(close(a.p2(), a.p() * a.p()));
    assert!(close(a.energy(), (30_f64 * (1.2_f64).cosh()).hypot(5.)));
    assert!(close(a.theta(), a.pt().atan2(a.z)));
    assert!(close(a.mt2(), a.t * a.t - a.z * a.z));
    assert!(close(a.et(), a.t * a.pt() / a.p()));

    let b = TLorentzVector::from_ptetaphie(30., 1.2, -0.4, a.t);
    assert!(close(b.x, a.x) && close(b.y, a.y) && close(b.z, a.z));
    assert_eq!(b.e(), a.t);

    let c = TLorentzVector::from_xyzm(1., 2., 3., 5.);
    assert!(close(c.t, (39_f64).sqrt()));
    assert!(close(c.mass(), 5.));
    assert!(close(c.beta(), c.p() / c.t));
    assert!(close(c.gamma(), c.t / 5.));
    assert_eq!(TLorentzVector::from_p3(c.p3(), c.t), c);

    //Boosting into the rest frame leaves only the mass
    let rest = c.boost(&-c.boostp3()).unwrap();
    assert!(approx_eq!(f64, rest.p(), 0., epsilon = 1e-9));
    assert!(close(rest.t, 5.));
    assert_eq!(c.boost(&TVector3::new(0., 0., 0.)).unwrap(), c);

    //Zero longitudinal momentum means zero rapidity
    assert_eq!(TLorentzVector::new(1., 0., 0., 2.).rapidity(), 0.);

    let d = PtEtaPhiMassLorentzVector(10., 0.2, 0.1, 0.);
    let e = PtEtaPhiMassLorentzVector(10., -0.2, -0.2, 0.);
    assert!(close(d.delta_phi(&e).unwrap(), 0.3));
    assert!(close(d.delta_r2(&e).unwrap(), 0.09 + 0.16));
    assert!(close(d.delta_r(&e).unwrap(), 0.5));

    let rotated = c.rotate_axis(&TVector3::new(1., 0., 0.), 0.5);
    let expected = c.rotatex(0.5);
    assert!(close(rotated.y, expected.y) && close(rotated.z, expected.z));
    assert_eq!(rotated.t, c.t);
    let about_y = c.rotatey(PI);
    assert!(close(about_y.x, -1.) && close(about_y.z, -3.));
}

#[test]
fn test_lorentzvector_array() {
    let a = lorentz_vectors();
    let expected: Vec<TLorentzVector> = (0..10).map(|i| TLorentzVector::new(0., i as f64, 0., 0.)).collect();
    assert_eq!(a.tolist(), expected);
    assert_eq!(a.get(5).unwrap(), TLorentzVector::new(0., 5., 0., 0.));

    let negative_squares: Array1<f64> = (0..10).map(|i| -((i * i) as f64)).collect();
    assert_eq!(a.mag2(), negative_squares);
    assert_eq!(a.pow(2.), negative_squares);

    let shifted = a.clone() + TLorentzVector::new(1000., 2000., 0., 0.);
    assert_eq!(shifted.get(5).unwrap(), TLorentzVector::new(1000., 2005., 0., 0.));
    let expected = TLorentzVectorArray::new(Array1::from_elem(10, 1000.), Array1::range(2000., 2010., 1.), Array1::zeros(10), Array1::zeros(10));
    assert!(shifted.eq_mask(&expected).unwrap().iter().all(|&flag| flag));

    let arot = a.rotatez(PI);
    for (aroti, ai) in arot.iter().zip(a.iter()) {
        assert!(approx_eq!(f64, aroti.x, -ai.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, aroti.y, -ai.y, epsilon = 1e-9));
        assert_eq!(aroti.z, ai.z);
        assert_eq!(aroti.t, ai.t);
    }
}

#[test]
fn test_ptetaphim_array() {
    let pt = Array1::from_elem(5, 20.);
    let eta = Array1::linspace(-5., 5., 5);
    let phi = Array1::linspace(-PI, PI, 6).slice(s![..5]).to_owned();
    let mass = Array1::linspace(0., 20., 5);
    let a = TLorentzVectorArray::from_ptetaphim(pt, eta.clone(), phi, mass.clone());

    let expected = [
        PtEtaPhiMassLorentzVector(100., -5., -PI, 0.),
        PtEtaPhiMassLorentzVector(100., -2.5, -PI + 2. * PI / 5., 25.),
        PtEtaPhiMassLorentzVector(100., 0., -PI + 4. * PI / 5., 50.),
        PtEtaPhiMassLorentzVector(100., 2.5, -PI + 6. * PI / 5., 75.),
        PtEtaPhiMassLorentzVector(100., 5., -PI + 8. * PI / 5., 100.),
    ];
    for (found, expected) in (a.clone() * 5.).iter().zip(expected.iter()) {
        for (f, e) in found.components().iter().zip(expected.components()) {
            assert!(approx_eq!(f64, **f, *e, epsilon = 1e-9 * e.abs().max(1.)), "{} != {}", found, expected);
        }
    }

    let total = a.sum();
    assert!(total.p() < 1e-10);
    let energies: f64 = izip!(eta.iter(), mass.iter()).map(|(eta, m)| (20. * eta.cosh()).hypot(*m)).sum();
    assert!(close(total.mass(), energies));
}

#[test]
fn test_dense_array_operations() {
    let a = vectors2();
    assert_eq!(a.len(), 10);
    assert!(!a.is_empty());
    assert_eq!(a.slice(2..5).unwrap().y, Array1::from(vec![2., 3., 4.]));
    assert_eq!(a.take(&[9, 0, 9]).unwrap().y, Array1::from(vec![9., 0., 9.]));
    assert_eq!(a.sum(), TVector2::new(0., 45.));
    assert_eq!(a.concat(&a).len(), 20);
    assert_eq!(TVector2Array::from_elements(&a.tolist()), a);
    assert_eq!(column_min(&a.y), Some(0.));
    assert_eq!(column_max(&a.y), Some(9.));
    assert_eq!(column_min(&Array1::zeros(0)), None);

    assert_eq!(a.get(10), Err(VectorError::IndexOutOfBounds { index: 10, len: 10 }));
    assert_eq!(a.get(-11), Err(VectorError::IndexOutOfBounds { index: -11, len: 10 }));
    assert!(a.slice(5..11).is_err());
    assert!(a.take(&[10]).is_err());

    let short = TVector2Array::new(Array1::zeros(3), Array1::zeros(3));
    assert_eq!(a.try_add(&short), Err(VectorError::ShapeMismatch { expected: 10, found: 3 }));
    assert_eq!(
        TVector2Array::try_new(Array1::zeros(3), Array1::zeros(4)),
        Err(VectorError::ShapeMismatch { expected: 3, found: 4 })
    );
}

#[test]
#[should_panic]
fn test_dense_array_shape_mismatch_panics() {
    let short = TVector2Array::new(Array1::zeros(3), Array1::zeros(3));
    let _ = vectors2() + short;
}

#[test]
fn test_vector2_jagged() {
    let a = JaggedArray::from_offsets(OFFSETS.to_vec(), vectors2()).unwrap();
    assert_eq!(a.tolist(), grouped(vectors2().tolist()));
    assert_eq!(a.x().tolist(), grouped(vec![0.; 10]));
    assert_eq!(a.y().tolist(), grouped((0..10).map(|i| i as f64).collect()));
    assert_eq!(a.num_groups(), 4);
    assert!(a.group(1).unwrap().is_empty());

    let shifted = a.clone() + TVector2::new(1000., 2000.);
    let expected: Vec<TVector2> = (0..10).map(|i| TVector2::new(1000., 2000. + i as f64)).collect();
    assert_eq!(shifted.tolist(), grouped(expected));

    //One vector per group
    let per_group = TVector2Array::new(Array1::from_elem(4, 1000.), Array1::from(vec![1000., 2000., 3000., 4000.]));
    let expected: Vec<TVector2> = [0, 0, 0, 2, 2, 3, 3, 3, 3, 3]
        .iter()
        .enumerate()
        .map(|(i, &group)| TVector2::new(1000., 1000. * (group + 1) as f64 + i as f64))
        .collect();
    assert_eq!((a.clone() + per_group).tolist(), grouped(expected));

    //One vector per element
    let positional = a.try_add(&vectors2()).unwrap();
    assert_eq!(positional.y().tolist(), grouped((0..10).map(|i| 2. * i as f64).collect()));

    let doubled = a.try_add(&a).unwrap();
    assert_eq!(doubled, a.scale(2.));
    assert_eq!((-a.clone()).y().content(), &(-Array1::range(0., 10., 1.)));
    assert_eq!((&a - &a).mag2().content(), &Array1::<f64>::zeros(10));
    assert!(a.eq_mask(&a).unwrap().content().iter().all(|&flag| flag));

    assert_eq!(
        a.try_add(&TVector2Array::new(Array1::zeros(7), Array1::zeros(7))),
        Err(VectorError::ShapeMismatch { expected: 4, found: 7 })
    );
    let regrouped = JaggedArray::from_offsets(vec![0, 5, 5, 5, 10], vectors2()).unwrap();
    assert!(a.try_add(&regrouped).is_err());

    //Magnitudes agree with the dense and single kinds
    assert_eq!(a.pow(2.), a.mag2());
    assert_eq!(a.dot(&a).unwrap(), a.mag2());
    assert_eq!(a.mag2().tolist(), grouped((0..10).map(|i| (i * i) as f64).collect()));
    assert_eq!(a.abs().content(), &Array1::range(0., 10., 1.));
    assert_eq!(a.mag(), a.abs());
    let units = a.unit().flatten().slice(1..10).unwrap();
    assert!(units.x.iter().all(|&x| x == 0.) && units.y.iter().all(|&y| y == 1.));

    assert_eq!(a.divide(2.).y().content(), &Array1::range(0., 5., 0.5));
    assert_eq!((a.clone() / 2.).y(), a.divide(2.).y());
    let reciprocal = 1. / a.clone();
    assert_eq!(reciprocal.offsets(), a.offsets());
    assert_eq!(reciprocal.x().content()[0], f64::INFINITY);
    assert_eq!(reciprocal.y().content()[4], 0.25);

    assert_eq!(a.rotatez(0.), a);
    let round_trip = a.rotatez(0.7).rotatez(-0.7);
    assert_eq!(round_trip.offsets(), a.offsets());
    for (back, original) in round_trip.flatten().iter().zip(a.flatten().iter()) {
        assert!(approx_eq!(f64, back.x, original.x, epsilon = 1e-9) && close(back.y, original.y));
    }
    assert!(close(a.rotate(PI / 2.).x().content()[2], -2.));
    let dphi = a.delta_phi(&a.rotate(0.1)).unwrap();
    assert!(dphi.content().iter().skip(1).all(|&d| close(d, -0.1)));
}

#[test]
fn test_jagged_dense_operand_prefers_groups() {
    //Two groups and two elements: a dense operand of length 2 is one vector per group
    let a = JaggedArray::from_offsets(vec![0, 0, 2], TVector2Array::new(Array1::zeros(2), Array1::zeros(2))).unwrap();
    let dense = TVector2Array::new(Array1::zeros(2), Array1::from(vec![1., 2.]));
    assert_eq!(a.try_add(&dense).unwrap().y().tolist(), vec![vec![], vec![2., 2.]]);

    //Grouped like the target, the same vectors apply element by element
    let per_element = JaggedArray::from_offsets(vec![0, 0, 2], dense).unwrap();
    assert_eq!(a.try_add(&per_element).unwrap().y().tolist(), vec![vec![], vec![1., 2.]]);
}

#[test]
fn test_vector3_jagged() {
    let a = JaggedArray::from_offsets(OFFSETS.to_vec(), vectors3()).unwrap();
    assert_eq!(a.tolist(), grouped(vectors3().tolist()));
    assert_eq!(a.z().tolist(), grouped(vec![0.; 10]));

    let per_group = TVector3Array::new(Array1::from_elem(4, 1000.), Array1::from(vec![1000., 2000., 3000., 4000.]), Array1::zeros(4));
    let sum = a.try_add(&per_group).unwrap();
    assert_eq!(sum.group(2).unwrap().tolist(), vec![TVector3::new(1000., 3003., 0.), TVector3::new(1000., 3004., 0.)]);

    let arot = a.rotatez(PI);
    for (aroti, ai) in arot.flatten().iter().zip(a.flatten().iter()) {
        assert!(approx_eq!(f64, aroti.x, -ai.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, aroti.y, -ai.y, epsilon = 1e-9));
        assert_eq!(aroti.z, ai.z);
    }

    let crossed = a.cross(&TVector3::new(0., 0., 1.)).unwrap();
    assert_eq!(crossed.x().content(), &Array1::range(0., 10., 1.));
    let angles = a.angle(&TVector3::new(0., 1., 0.)).unwrap();
    assert!(angles.content().iter().all(|&angle| angle == 0.));

    let turned = a.rotatex(PI / 2.);
    assert_eq!(turned.offsets(), a.offsets());
    for (i, (&y, &z)) in turned.y().content().iter().zip(turned.z().content().iter()).enumerate() {
        assert!(approx_eq!(f64, y, 0., epsilon = 1e-9) && close(z, i as f64));
    }
    let about_x = a.rotate_axis(&TVector3::new(2., 0., 0.), PI / 2.);
    for (p, q) in about_x.flatten().iter().zip(turned.flatten().iter()) {
        assert!(close(p.x, q.x) && close(p.y, q.y) && close(p.z, q.z));
    }
    assert_eq!(a.rotatey(PI / 2.).y(), a.y());

    //The first element is the null vector
    assert!(a.theta().content().iter().skip(1).all(|&theta| close(theta, PI / 2.)));
    assert!(a.eta().content().iter().skip(1).all(|&eta| eta == 0.));
    assert!(a.phi().content().iter().skip(1).all(|&phi| close(phi, PI / 2.)));
    assert!(close(a.rho().content()[7], 7.));
    assert!(a.delta_phi(&a).unwrap().content().iter().all(|&d| d == 0.));
}

#[test]
fn test_lorentzvector_jagged() {
    let a = JaggedArray::from_offsets(OFFSETS.to_vec(), lorentz_vectors()).unwrap();
    assert_eq!(a.tolist(), grouped(lorentz_vectors().tolist()));
    assert_eq!(a.t().tolist(), grouped(vec![0.; 10]));

    let shifted = a.clone() + TLorentzVector::new(1000., 2000., 0., 0.);
    assert_eq!(shifted.group(0).unwrap().get(2).unwrap(), TLorentzVector::new(1000., 2002., 0., 0.));

    let sums = a.sum();
    assert_eq!(sums.y, Array1::from(vec![3., 0., 7., 35.]));
    assert_eq!(sums.get(1).unwrap(), TLorentzVector::new(0., 0., 0., 0.));

    let events = JaggedArray::from_counts(&[2, 1], TLorentzVectorArray::from_ptetaphim(
        Array1::from(vec![40., 40., 10.]),
        Array1::from(vec![0., 0., 1.]),
        Array1::from(vec![0., PI, 0.]),
        Array1::from(vec![0., 0., 5.]),
    ))
    .unwrap();
    let masses = events.sum().mass();
    assert!(close(masses[0], 80.));
    assert!(close(masses[1], 5.));
    assert!(close(events.mass().content()[2], 5.));
    assert!(close(events.pt().content()[0], 40.));
    assert!(close(events.eta().content()[2], 1.));
    assert!(close(events.phi().content()[1], PI));

    assert!(close(events.p().content()[0], 40.));
    assert!(close(events.theta().content()[0], PI / 2.));

    //Boosting every event into its own rest frame keeps its mass and removes its momentum
    let totals = events.sum();
    let rest = events.boost(&(-totals.boostp3())).unwrap();
    assert_eq!(rest.offsets(), events.offsets());
    let rest_totals = rest.sum();
    for (p, (m, expected)) in rest_totals.p().iter().zip(rest_totals.mass().iter().zip(totals.mass().iter())) {
        assert!(approx_eq!(f64, *p, 0., epsilon = 1e-9), "rest-frame momentum {}", p);
        assert!(close(*m, *expected));
    }
    assert_eq!(events.boost(&TVector3::new(0., 0., 0.)).unwrap(), events);
    assert!(events.boost(&TVector3Array::splat(&TVector3::new(0., 0., 0.), 5)).is_err());

    let turned = events.rotatez(0.2);
    assert!(events.delta_phi(&turned).unwrap().content().iter().all(|&d| close(d, -0.2)));
    assert!(events.delta_r(&turned).unwrap().content().iter().all(|&d| close(d, 0.2)));
    assert!(events.delta_r2(&turned).unwrap().content().iter().all(|&d| close(d, 0.04)));
    assert_eq!(events.rotatex(0.3).t(), events.t());
    assert_eq!(events.rotatey(0.3).t(), events.t());
    assert_eq!(events.rotate_axis(&TVector3::new(0., 1., 0.), 0.3).t(), events.t());
    assert!(close(events.rotatey(PI).z().content()[2], -events.z().content()[2]));
}

#[test]
fn test_jagged_structure() {
    let a = JaggedArray::from_offsets(OFFSETS.to_vec(), vectors2()).unwrap();
    assert_eq!(a.offsets(), &OFFSETS);
    assert_eq!(a.counts(), vec![3, 0, 2, 5]);
    assert_eq!(a.parents(), vec![0, 0, 0, 2, 2, 3, 3, 3, 3, 3]);
    assert_eq!(a.content_len(), 10);
    assert_eq!(JaggedArray::from_counts(&[3, 0, 2, 5], vectors2()).unwrap(), a);
    assert_eq!(a.group(-1).unwrap().len(), 5);
    assert!(a.group(4).is_err());

    let middle = a.slice_groups(1..3).unwrap();
    assert_eq!(middle.offsets(), &[0, 0, 2]);
    assert_eq!(middle.y().tolist(), vec![vec![], vec![3., 4.]]);

    let norms = a.apply(|v| v.abs()).unwrap();
    assert_eq!(norms.tolist(), grouped((0..10).map(|i| i as f64).collect()));
    assert!(a.apply(|v| v.slice(0..4).unwrap()).is_err());
    assert_eq!(a.flatten(), vectors2());

    //Offsets must start at 0, never decrease, and end at the content length
    assert!(matches!(JaggedArray::from_offsets(vec![1, 3, 10], vectors2()), Err(VectorError::InvalidOffsets(_))));
    assert!(matches!(JaggedArray::from_offsets(vec![0, 5, 3, 10], vectors2()), Err(VectorError::InvalidOffsets(_))));
    assert!(matches!(JaggedArray::from_offsets(vec![0, 3, 9], vectors2()), Err(VectorError::InvalidOffsets(_))));
    assert!(matches!(JaggedArray::from_offsets(Vec::<usize>::new(), vectors2()), Err(VectorError::InvalidOffsets(_))));
}

#[test]
fn test_histogram_regular() {
    let h = Histogram::from_numpy(&[1., 2., 3.], &[0., 1., 2., 3.], "test").unwrap();
    assert!(h.is_regular());
    assert_eq!(h.classname, HistType::TH1D);
    assert_eq!(h.numbins(), 3);
    assert_eq!((h.low(), h.high()), (0., 3.));
    assert_eq!(h.values(), &[1., 2., 3.]);
    assert_eq!(h.allvalues(), &[0., 1., 2., 3., 0.]);
    assert_eq!(h.variances(), &[1., 4., 9.]);
    assert_eq!(h.allvariances(), &[0., 1., 4., 9., 0.]);
    assert_eq!((h.underflows(), h.overflows()), (0., 0.));
    assert_eq!(h.entries, 6.);
    assert_eq!(h.tsumwx, 11.);

    assert_eq!(h.interval(0).unwrap(), (f64::NEG_INFINITY, 0.));
    assert_eq!(h.interval(2).unwrap(), (1., 2.));
    assert_eq!(h.interval(-1).unwrap(), (3., f64::INFINITY));
    assert!(h.interval(5).is_err());

    assert_eq!(h.index(-1.), Some(0));
    assert_eq!(h.index(0.5), Some(1));
    assert_eq!(h.index(2.), Some(3));
    assert_eq!(h.index(3.), Some(4));
    assert_eq!(h.index(f64::NAN), None);

    assert_eq!(h.numpy(), (vec![1., 2., 3.], vec![0., 1., 2., 3.]));
}

#[test]
fn test_histogram_irregular() {
    let h = Histogram::from_numpy(&[1_i32, 2, 3], &[0., 1., 3., 10.], "").unwrap();
    assert!(!h.is_regular());
    assert_eq!(h.classname, HistType::TH1I);
    assert_eq!(h.interval(2).unwrap(), (1., 3.));
    assert_eq!(h.index(2.), Some(2));
    assert_eq!(h.index(5.), Some(3));
    assert_eq!(h.index(10.), Some(4));
    assert_eq!(h.edges(), vec![0., 1., 3., 10.]);

    let bytes = h.to_be_bytes();
    assert_eq!(bytes.len(), 5 * 4);
    assert_eq!(&bytes[4..8], &[0, 0, 0, 1]);

    assert_eq!(Histogram::from_numpy(&[true, false], &[0., 1., 2.], "").unwrap().classname, HistType::TH1C);
    assert_eq!(Histogram::from_numpy(&[1_u8, 100], &[0., 1., 2.], "").unwrap().classname, HistType::TH1C);
    assert_eq!(Histogram::from_numpy(&[1_u8, 200], &[0., 1., 2.], "").unwrap().classname, HistType::TH1S);
    assert_eq!(Histogram::from_numpy(&[1_u32, u32::MAX], &[0., 1., 2.], "").unwrap().classname, HistType::TH1D);
    assert_eq!(Histogram::from_numpy(&[1_f32, 2.], &[0., 1., 2.], "").unwrap().classname, HistType::TH1F);

    assert!(matches!(Histogram::from_numpy(&[1.], &[0.], ""), Err(VectorError::InvalidBinning(_))));
    assert!(matches!(Histogram::from_numpy(&[1., 2.], &[0., 2., 1.], ""), Err(VectorError::InvalidBinning(_))));
    assert!(matches!(Histogram::from_numpy(&[1., 2.], &[0., 1.], ""), Err(VectorError::InvalidBinning(_))));
}

#[test]
fn test_histogram_table() {
    let h = Histogram::from_numpy(&[1., 0., 3.], &[0., 1., 2., 3.], "table").unwrap();
    let rows = h.to_table(true, true, true);
    assert_eq!(
        rows,
        vec![
            TableRow { left: 0., right: 1., count: 1., variance: Some(1.) },
            TableRow { left: 2., right: 3., count: 3., variance: Some(9.) },
        ]
    );
    assert_eq!(h.to_table(false, false, false)[0].variance, None);

    let rebuilt = Histogram::from_table(&rows, "table").unwrap();
    assert_eq!(rebuilt.numpy(), h.numpy());
    assert_eq!(rebuilt.variances(), &[1., 0., 9.]);

    let with_flows = vec![
        TableRow { left: 5., right: 6., count: 2., variance: None },
        TableRow { left: f64::NEG_INFINITY, right: 5., count: 4., variance: None },
        TableRow { left: 8., right: f64::INFINITY, count: 1., variance: None },
        TableRow { left: 6., right: 8., count: 3., variance: None },
    ];
    let h = Histogram::from_table(&with_flows, "").unwrap();
    assert_eq!(h.edges(), vec![5., 6., 8.]);
    assert_eq!(h.allvalues(), &[4., 2., 3., 1.]);

    let overlapping = vec![
        TableRow { left: 0., right: 2., count: 1., variance: None },
        TableRow { left: 1., right: 3., count: 1., variance: None },
    ];
    assert!(matches!(Histogram::from_table(&overlapping, ""), Err(VectorError::InvalidBinning(_))));
}

#[test]
fn test_histogram_fill_and_show() {
    let mut h = Histogram::new(10, 0., 10., "fill").unwrap();
    h.fill(2.5, 1.);
    h.fill(2.7, 2.);
    h.fill(-1., 1.);
    h.fill(f64::NAN, 1.);
    assert_eq!(h.values()[2], 3.);
    assert_eq!(h.variances()[2], 5.);
    assert_eq!(h.underflows(), 1.);
    assert_eq!(h.entries, 3.);
    assert_eq!(h.tsumw, 3.);
    assert!(matches!(Histogram::new(0, 0., 1., ""), Err(VectorError::InvalidBinning(_))));

    let h = Histogram::from_numpy(&[1., 2., 3.], &[0., 1., 2., 3.], "").unwrap();
    let text = h.show(80);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5 + 3);
    assert!(lines[2].starts_with("[-inf, 0)"));
    assert!(lines[6].starts_with("[3, inf]"));
    assert!(lines.iter().all(|line| line.len() <= 80));
    assert_eq!(h.to_string(), h.show(DEFAULT_SHOW_WIDTH));
}

const EVENTS_INPUT: &str = r#"
[options]
name = "test_"
num_chunks = 2

[histogram]
quantity = "MASS"
bins = 10
low = 0.0
high = 250.0

[particle_parameters.EVENTS]
offsets = [0, 2, 2, 3]
pt = [40.0, 40.0, 10.0]
eta = [0.0, 0.0, 1.0]
phi = [0.0, 3.141592653589793, 0.0]
mass = [0.0, 0.0, 5.0]
"#;

#[test]
fn test_input_and_analysis() {
    let input = input::parse_input(EVENTS_INPUT).unwrap();
    assert_eq!(input.options.name, "test_");
    assert!(input.options.write_histogram);
    assert_eq!(input.options.print_width, DEFAULT_SHOW_WIDTH);
    assert_eq!(input.histogram.quantity, Quantity::MASS);

    let events = input::build_events(&input.particle_parameters).unwrap();
    assert_eq!(events.counts(), vec![2, 0, 1]);

    let result = analysis::analysis_loop(&events, &input.options, &input.histogram).unwrap();
    assert_eq!(result.totals.len(), 3);
    assert_eq!(result.empty_events, 1);
    assert_eq!(result.histogram.entries, 2.);
    assert_eq!(result.histogram.values()[0], 1.);
    assert_eq!(result.histogram.values()[3], 1.);

    let pts = analysis::evaluate(Quantity::PT, &result.totals);
    assert!(close(pts[2], 10.));

    let serialized = toml::to_string(&result.histogram).unwrap();
    assert!(serialized.contains("classname = \"TH1D\""));
}

#[test]
fn test_input_errors() {
    assert!(input::parse_input(&EVENTS_INPUT.replace("num_chunks = 2", "num_chunks = 0")).is_err());
    assert!(input::parse_input(&EVENTS_INPUT.replace("high = 250.0", "high = -1.0")).is_err());
    assert!(input::parse_input("[options]\nname = \"x\"").is_err());

    let unequal = input::parse_input(&EVENTS_INPUT.replace("mass = [0.0, 0.0, 5.0]", "mass = [0.0, 0.0]")).unwrap();
    assert!(input::build_events(&unequal.particle_parameters).is_err());
    let bad_offsets = input::parse_input(&EVENTS_INPUT.replace("offsets = [0, 2, 2, 3]", "offsets = [0, 2, 1, 3]")).unwrap();
    assert!(input::build_events(&bad_offsets.particle_parameters).is_err());
}

#[test]
fn test_generated_events() {
    let generated = r#"
[options]
name = "toy_"

[histogram]
quantity = "PT"
bins = 20
low = 0.0
high = 200.0

[particle_parameters.GENERATED]
num_events = 50
seed = 7
multiplicity = {UNIFORM = {min = 1.0, max = 4.0}}
pt = {NORMAL = {mean = 30.0, std = 5.0}}
eta = {UNIFORM = {min = -2.5, max = 2.5}}
phi = {UNIFORM = {min = -3.14159, max = 3.14159}}
mass = {POINT = 0.105}
"#;
    let input = input::parse_input(generated).unwrap();
    assert_eq!(input.options.num_chunks, 1);

    let events = input::build_events(&input.particle_parameters).unwrap();
    assert_eq!(events.num_groups(), 50);
    assert!(events.counts().iter().all(|&count| (1..=4).contains(&count)));
    assert_eq!(events.content_len(), events.counts().iter().sum::<usize>());
    assert!(events.flatten().mass().iter().all(|&m| approx_eq!(f64, m, 0.105, epsilon = 1e-6)));

    //The same seed reproduces the same events
    assert_eq!(input::build_events(&input.particle_parameters).unwrap(), events);
}

#[test]
fn test_convenience_functions() {
    let mass = invariant_mass(vec![40., 40.], vec![0., 0.], vec![0., PI], vec![0., 0.]).unwrap();
    assert!(close(mass, 80.));
    assert!(invariant_mass(vec![40.], vec![0., 0.], vec![0.], vec![0.]).is_err());

    let masses = event_masses(vec![0, 2, 2], vec![40., 40.], vec![0., 0.], vec![0., PI], vec![0., 0.]).unwrap();
    assert!(close(masses[0], 80.));
    assert_eq!(masses[1], 0.);
    assert!(event_masses(vec![0, 3], vec![40., 40.], vec![0., 0.], vec![0., PI], vec![0., 0.]).is_err());

    assert!(close(pair_mass_c(40., 0., 0., 0., 40., 0., PI, 0.), 80.));
}
