/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use ecsig::signatures::ecdsa::Signature as EcdsaSignature;
use ecsig::signatures::schnorr::Signature as SchnorrSignature;
use ecsig::utils::bytes;
use ecsig::{
    DerSignature, Ecdsa, Error, ErrorKind, Point, PrivateKey, PublicKey, Schnorr, Secp256k1, Sha256,
    Sha256d,
};
use ibig::{ibig, IBig};
use rand::rngs::StdRng;
use rand::SeedableRng;

type P = Point<Secp256k1>;

fn hex(s: &str) -> Vec<u8> {
    bytes::from_hex(s).unwrap()
}

#[test]
fn test_generator_multiples() {
    let p = P::generator().multiply(&ibig!(42)).unwrap();
    assert_eq!(
        p,
        P::from_coordinates(
            IBig::from_str_radix(
                "115136800820456833737994126771386015026287095034625623644186278108926690779567",
                10
            )
            .unwrap(),
            IBig::from_str_radix(
                "3479535755779840016334846590594739014278212596066547564422106861430200972724",
                10
            )
            .unwrap(),
        )
    );

    let sum = P::generator()
        .multiply(&ibig!(40))
        .unwrap()
        .add(&P::generator().multiply(&ibig!(2)).unwrap())
        .unwrap();
    assert_eq!(sum, p);
}

#[test]
fn test_compression() {
    assert_eq!(
        bytes::to_hex(&P::public_key(&ibig!(103)).unwrap()),
        "0234c1fd04d301be89b31c0442d3e6ac24883928b45a9340781867d4232ec2dbdf"
    );

    let key = PrivateKey::<Secp256k1>::from_be_bytes(&hex(
        "18e14a7b6a307f426a94f8114701e7c8e774e7f9a47e2c2035db29a206321725",
    ))
    .unwrap();
    let compressed = key.public_key().unwrap().to_compressed().unwrap();
    assert_eq!(
        bytes::to_hex(&compressed),
        "0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352"
    );
    assert_eq!(
        PublicKey::<Secp256k1>::from_compressed(&compressed).unwrap(),
        key.public_key().unwrap()
    );

    for k in [1u32, 2, 3, 7, 1000, 65537] {
        let point = P::generator().multiply(&IBig::from(k)).unwrap();
        assert_eq!(P::decompress(&point.compress().unwrap()).unwrap(), point);
    }
}

#[test]
fn test_decompression_errors() {
    let mut x = vec![0x02];
    x.extend_from_slice(&[0; 31]);
    x.push(5);
    let err = P::decompress(&x).unwrap_err();
    assert_eq!(err, Error::NotOnCurve);
    assert_eq!(err.kind(), ErrorKind::Domain);

    x[0] = 0x04;
    let err = P::decompress(&x).unwrap_err();
    assert_eq!(err, Error::InvalidOrientation(0x04));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_ecdsa_satoshi() {
    let key = PrivateKey::<Secp256k1>::new(ibig!(1)).unwrap();
    let ecdsa = Ecdsa::new(Sha256d);
    let nonce = ibig!(_8f8a276c19f4149656b280621e358cce24f5f52542772691ee69063b74f15d15 base 16);
    let signature = ecdsa
        .sign(b"Satoshi Nakamoto", &key, &mut || nonce.clone())
        .unwrap();

    assert_eq!(
        signature.r,
        IBig::from_str_radix(
            "66622713665624427733710315200720396955896638749566533714623508373930515555288",
            10
        )
        .unwrap()
    );
    assert_eq!(
        signature.s,
        IBig::from_str_radix(
            "104547365282402277427930334588853961202488080074579832666060404000093909658466",
            10
        )
        .unwrap()
    );

    let der = DerSignature::from(signature);
    assert_eq!(
        der.s(),
        &IBig::from_str_radix(
            "11244723954913917995640650419833946650349484204495071716544759141424251835871",
            10
        )
        .unwrap()
    );
    let normalized = EcdsaSignature::from(der);
    assert!(ecdsa
        .verify(b"Satoshi Nakamoto", &normalized, &key.public_key().unwrap())
        .unwrap());
}

#[test]
fn test_ecdsa_der_with_sighash() {
    let mut rng = StdRng::seed_from_u64(2023);
    let key = PrivateKey::<Secp256k1>::random(&mut rng).unwrap();
    let ecdsa = Ecdsa::new(Sha256d);
    let message = b"bitcoin transaction";

    let mut buf = ecdsa.sign_deterministic(message, &key).unwrap().to_der().unwrap();
    buf.push(0x01);

    let (signature, consumed) = EcdsaSignature::<Secp256k1>::from_der(&buf).unwrap();
    assert_eq!(&buf[consumed..], &[0x01]);
    assert!(ecdsa.verify(message, &signature, &key.public_key().unwrap()).unwrap());

    // flipping any byte of the message fails
    for i in 0..message.len() {
        let mut tampered = message.to_vec();
        tampered[i] ^= 0x01;
        assert!(!ecdsa.verify(&tampered, &signature, &key.public_key().unwrap()).unwrap());
    }

    // flipping any byte of the signature fails to parse or to verify
    for i in 0..consumed {
        let mut tampered = buf.clone();
        tampered[i] ^= 0x01;
        if let Ok((tampered, _)) = EcdsaSignature::<Secp256k1>::from_der(&tampered) {
            assert!(!ecdsa.verify(message, &tampered, &key.public_key().unwrap()).unwrap());
        }
    }
}

#[test]
fn test_schnorr() {
    let mut rng = StdRng::seed_from_u64(1);
    let key = PrivateKey::<Secp256k1>::random(&mut rng).unwrap();
    let pub_key = key.public_key().unwrap();
    let schnorr = Schnorr::new(Sha256);

    let signature = schnorr.sign_deterministic(b"schnorr", &key).unwrap();
    assert!(schnorr.verify(b"schnorr", &signature, &pub_key).unwrap());

    let parsed = SchnorrSignature::<Secp256k1>::from_bytes(&signature.to_bytes().unwrap()).unwrap();
    assert!(schnorr.verify(b"schnorr", &parsed, &pub_key).unwrap());
    assert!(!schnorr.verify(b"Schnorr", &parsed, &pub_key).unwrap());

    // a flipped byte either breaks R or gives a signature that does not verify
    let buf = signature.to_bytes().unwrap();
    for i in 0..buf.len() {
        let mut tampered = buf.clone();
        tampered[i] ^= 0x01;
        let tampered = SchnorrSignature::<Secp256k1>::from_bytes(&tampered).unwrap();
        match schnorr.verify(b"schnorr", &tampered, &pub_key) {
            Ok(valid) => assert!(!valid),
            Err(err) => assert!(matches!(
                err,
                Error::NotOnCurve | Error::CoordinateOutOfRange | Error::InvalidOrientation(_)
            )),
        }
    }
}
